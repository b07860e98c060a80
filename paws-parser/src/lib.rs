#![no_std]

/*!
Low-level tokenizing of command-line arguments. Takes care of distinctions
between long options, short options, grouped shorts, and positionals, and of
the `--` separator. No type handling happens here, and nothing here knows which
flags exist. Usually this is too low level to use directly.
*/

use core::iter::Fuse;

/**
The [`ArgumentsParser`] type operates by passing the arguments it finds into a
[`Visitor`], to be handled.
 */
pub trait Visitor<'arg> {
    type Value;

    /// A positional parameter. Everything after a `--` is reported here, as
    /// is a lone `-`.
    fn visit_positional(self, argument: &'arg str) -> Self::Value;

    /// A long option that definitely has an argument, because it was given
    /// as `--option=argument`. The split happens on the first `=`.
    fn visit_long_option(self, option: &'arg str, argument: &'arg str) -> Self::Value;

    /// A long option or flag, such as `--option`
    fn visit_long(self, option: &'arg str, arg: impl ArgAccess<'arg>) -> Self::Value;

    /// A short option or flag, such as `-o`
    fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) -> Self::Value;

    /// Several short flags behind a single dash, such as `-abc`. The group
    /// never contains the leading dash and always has at least two characters.
    fn visit_short_group(self, group: &'arg str) -> Self::Value;
}

/**
[`ArgAccess`] allows a visitor to decide if a given option consumes the
following argument, based on the identity of the option.

Consider `--foo bar`. Is this a pair of parameters (the flag `--foo` and the
positional parameter `bar`) or a single option `--foo bar` that takes an
argument? The [`ArgumentsParser`] can't independently classify it, so instead a
visitor requests an argument via this trait only for options that need one.

An argument that starts with `-` is never handed out this way; it is left in
place to be parsed as an option (or as the `--` separator) on its own.
*/
pub trait ArgAccess<'arg>: Sized {
    /**
    Take the next argument if it exists, doesn't look like an option, and
    satisfies `accept`. If any of those fail, the argument is left untouched
    and will be visited normally.
    */
    fn take_if(self, accept: impl FnOnce(&'arg str) -> bool) -> Option<&'arg str>;

    /// Take the next argument, as long as it exists and doesn't look like an
    /// option.
    #[inline]
    fn take(self) -> Option<&'arg str> {
        self.take_if(|_| true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    PositionalOnly,
}

/**
An `ArgumentsParser` is the main entry point into `paws_parser`. It parses
arguments in each call to [`next_arg`][ArgumentsParser::next_arg], sending
them to the given [`Visitor`]. It handles distinguishing flags, options, and
positionals, and switches to positional-only mode after a `--`.

The parser operates entirely on borrowed data. The ubiquitous `'arg` lifetime
refers to the borrowed command line.
*/
#[derive(Debug, Clone)]
pub struct ArgumentsParser<'arg, I> {
    state: State,
    peeked: Option<&'arg str>,
    args: Fuse<I>,
}

impl<'arg, I> ArgumentsParser<'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    /**
    Create a new [`ArgumentsParser`] from an iterator of string slices, where
    each slice is a single argument. This list should *exclude* the name of
    the program, and anything else (like a command path) that was already
    consumed by the caller.
     */
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            state: State::Ready,
            peeked: None,
            args: args.into_iter().fuse(),
        }
    }

    /// True if a `--` was seen, meaning that everything afterwards is
    /// treated as a positional argument.
    #[inline]
    #[must_use]
    pub fn double_dash_seen(&self) -> bool {
        self.state == State::PositionalOnly
    }

    #[inline]
    fn next_raw(&mut self) -> Option<&'arg str> {
        self.peeked.take().or_else(|| self.args.next())
    }

    #[inline]
    fn peek_raw(&mut self) -> Option<&'arg str> {
        if self.peeked.is_none() {
            self.peeked = self.args.next();
        }

        self.peeked
    }

    /// Put `self` into a `PositionalOnly` state, then process a positional
    /// argument
    #[inline]
    fn positional_only_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        self.state = State::PositionalOnly;
        self.next_raw().map(|arg| visitor.visit_positional(arg))
    }

    #[inline]
    fn standard_arg(&mut self) -> StandardArgAccess<'_, 'arg, I> {
        debug_assert_eq!(self.state, State::Ready);

        StandardArgAccess { parent: self }
    }

    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        match self.state {
            State::PositionalOnly => self.positional_only_arg(visitor),
            State::Ready => match self.next_raw()? {
                "--" => self.positional_only_arg(visitor),
                argument => Some(if let Some(option) = argument.strip_prefix("--") {
                    match split_once(option, b'=') {
                        Some((option, argument)) => visitor.visit_long_option(option, argument),
                        None => visitor.visit_long(option, self.standard_arg()),
                    }
                } else if let Some(short) = argument.strip_prefix('-') {
                    let mut chars = short.chars();

                    match (chars.next(), chars.as_str()) {
                        (None, _) => visitor.visit_positional(argument),
                        (Some(option), "") => visitor.visit_short(option, self.standard_arg()),
                        (Some(_), _) => visitor.visit_short_group(short),
                    }
                } else {
                    visitor.visit_positional(argument)
                }),
            },
        }
    }
}

/// ArgAccess implementation that gets the next argument from the list.
struct StandardArgAccess<'a, 'arg, I> {
    parent: &'a mut ArgumentsParser<'arg, I>,
}

impl<'arg, I> ArgAccess<'arg> for StandardArgAccess<'_, 'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    fn take_if(self, accept: impl FnOnce(&'arg str) -> bool) -> Option<&'arg str> {
        let candidate = self.parent.peek_raw()?;

        if candidate.starts_with('-') || !accept(candidate) {
            return None;
        }

        self.parent.next_raw()
    }
}

fn split_once(input: &str, delimiter: u8) -> Option<(&str, &str)> {
    // The delimiter is ASCII, so both sides of it are char boundaries
    memchr::memchr(delimiter, input.as_bytes()).map(|i| (&input[..i], &input[i + 1..]))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Token<'a> {
        Positional(&'a str),
        LongOption(&'a str, &'a str),
        Long(&'a str, Option<&'a str>),
        Short(char, Option<&'a str>),
        Group(&'a str),
    }

    /// Takes an argument for every option whose name satisfies `takes`
    struct Recorder {
        takes: fn(&str) -> bool,
    }

    impl<'a> Visitor<'a> for Recorder {
        type Value = Token<'a>;

        fn visit_positional(self, argument: &'a str) -> Token<'a> {
            Token::Positional(argument)
        }

        fn visit_long_option(self, option: &'a str, argument: &'a str) -> Token<'a> {
            Token::LongOption(option, argument)
        }

        fn visit_long(self, option: &'a str, arg: impl ArgAccess<'a>) -> Token<'a> {
            let value = if (self.takes)(option) { arg.take() } else { None };
            Token::Long(option, value)
        }

        fn visit_short(self, option: char, arg: impl ArgAccess<'a>) -> Token<'a> {
            let mut buf = [0; 4];
            let value = if (self.takes)(option.encode_utf8(&mut buf)) {
                arg.take()
            } else {
                None
            };
            Token::Short(option, value)
        }

        fn visit_short_group(self, group: &'a str) -> Token<'a> {
            Token::Group(group)
        }
    }

    fn tokenize<'a>(args: &[&'a str], takes: fn(&str) -> bool) -> (Vec<Token<'a>>, bool) {
        let mut parser = ArgumentsParser::new(args.iter().copied());
        let mut tokens = Vec::new();

        while let Some(token) = parser.next_arg(Recorder { takes }) {
            tokens.push(token);
        }

        (tokens, parser.double_dash_seen())
    }

    fn never(_: &str) -> bool {
        false
    }

    #[test]
    fn classifies_each_form() {
        let (tokens, dash) = tokenize(&["build", "--path=a=b", "--verbose", "-v", "-abc", "-"], never);

        assert_eq!(
            tokens,
            [
                Token::Positional("build"),
                Token::LongOption("path", "a=b"),
                Token::Long("verbose", None),
                Token::Short('v', None),
                Token::Group("abc"),
                Token::Positional("-"),
            ]
        );
        assert!(!dash);
    }

    #[test]
    fn options_take_following_argument() {
        let (tokens, _) = tokenize(&["--out", "file", "-n", "3", "rest"], |_| true);

        assert_eq!(
            tokens,
            [
                Token::Long("out", Some("file")),
                Token::Short('n', Some("3")),
                Token::Positional("rest"),
            ]
        );
    }

    #[test]
    fn option_like_arguments_are_never_taken() {
        let (tokens, dash) = tokenize(&["--out", "--", "-x"], |_| true);

        assert_eq!(
            tokens,
            [Token::Long("out", None), Token::Positional("-x")]
        );
        assert!(dash);
    }

    #[test]
    fn rejected_argument_is_visited_normally() {
        let mut parser = ArgumentsParser::new(["--flag", "maybe"]);

        struct Picky;

        impl<'a> Visitor<'a> for Picky {
            type Value = Option<&'a str>;

            fn visit_positional(self, argument: &'a str) -> Self::Value {
                Some(argument)
            }

            fn visit_long_option(self, _: &'a str, _: &'a str) -> Self::Value {
                None
            }

            fn visit_long(self, _: &'a str, arg: impl ArgAccess<'a>) -> Self::Value {
                arg.take_if(|value| value == "yes")
            }

            fn visit_short(self, _: char, _: impl ArgAccess<'a>) -> Self::Value {
                None
            }

            fn visit_short_group(self, _: &'a str) -> Self::Value {
                None
            }
        }

        assert_eq!(parser.next_arg(Picky), Some(None));
        assert_eq!(parser.next_arg(Picky), Some(Some("maybe")));
        assert_eq!(parser.next_arg(Picky), None);
    }

    #[test]
    fn double_dash_freezes_positionals() {
        let (tokens, dash) = tokenize(&["-v", "--", "--looks-like-flag", "--", "-x"], never);

        assert_eq!(
            tokens,
            [
                Token::Short('v', None),
                Token::Positional("--looks-like-flag"),
                Token::Positional("--"),
                Token::Positional("-x"),
            ]
        );
        assert!(dash);
    }

    #[test]
    fn lone_double_dash() {
        let (tokens, dash) = tokenize(&["--"], never);

        assert!(tokens.is_empty());
        assert!(dash);
    }

    #[test]
    fn empty_long_option_value() {
        let (tokens, _) = tokenize(&["--name=", "--=x"], never);

        assert_eq!(
            tokens,
            [Token::LongOption("name", ""), Token::LongOption("", "x")]
        );
    }

    #[test]
    fn multibyte_short_options() {
        let (tokens, _) = tokenize(&["-é", "-éa"], never);

        assert_eq!(tokens, [Token::Short('é', None), Token::Group("éa")]);
    }
}

/*!
The parse loop: match the longest command path, then feed the remaining tokens
through the [`paws_parser`] tokenizer, routing each one to flag assignment
(with validation) or to the positional list.
 */

use std::collections::HashMap;

use paws_parser::{ArgAccess, ArgumentsParser};
use tracing::{debug, trace};

use crate::command::CommandDefinition;
use crate::errors::ParseError;
use crate::flag::{FlagDefinition, FlagType};
use crate::registry::Registry;
use crate::result::ParseResult;
use crate::validate::{self, is_bool_literal};

/// Find the command with the longest path that prefixes `tokens`.
pub(crate) fn match_command<'r, S: AsRef<str>>(
    commands: &'r [CommandDefinition],
    tokens: &[S],
) -> Option<&'r CommandDefinition> {
    commands
        .iter()
        .filter(|command| command.is_prefix_of(tokens))
        .max_by_key(|command| command.path().len())
}

struct Dispatcher<'a, 'r> {
    registry: &'r Registry,
    command: Option<&'r CommandDefinition>,
    flags: &'a mut HashMap<String, String>,
    positional: &'a mut Vec<String>,
}

impl<'r> Dispatcher<'_, 'r> {
    fn lookup(&self, name: &str) -> Result<&'r FlagDefinition, ParseError> {
        self.registry
            .find_flag(self.command, name)
            .ok_or_else(|| ParseError::UnknownFlag {
                flag: name.to_owned(),
            })
    }

    fn assign(self, flag: &FlagDefinition, value: &str) -> Result<(), ParseError> {
        validate::validate(flag, value)?;
        self.flags.insert(flag.name().to_owned(), value.to_owned());
        Ok(())
    }

    /// A flag without an `=value`. Bool flags take the next argument only if
    /// it's a boolean literal; every other type requires one.
    fn assign_from<'arg>(self, name: &str, arg: impl ArgAccess<'arg>) -> Result<(), ParseError> {
        let flag = self.lookup(name)?;

        let value = match flag.kind() {
            FlagType::Bool => arg.take_if(is_bool_literal).unwrap_or("true"),
            _ => arg.take().ok_or_else(|| ParseError::MissingValue {
                flag: flag.name().to_owned(),
            })?,
        };

        trace!(flag = flag.name(), value, "assigning flag");
        self.assign(flag, value)
    }
}

impl<'arg> paws_parser::Visitor<'arg> for Dispatcher<'_, '_> {
    type Value = Result<(), ParseError>;

    fn visit_positional(self, argument: &'arg str) -> Self::Value {
        trace!(argument, "positional");
        self.positional.push(argument.to_owned());
        Ok(())
    }

    fn visit_long_option(self, option: &'arg str, argument: &'arg str) -> Self::Value {
        trace!(option, argument, "long option with value");
        let flag = self.lookup(option)?;
        self.assign(flag, argument)
    }

    fn visit_long(self, option: &'arg str, arg: impl ArgAccess<'arg>) -> Self::Value {
        trace!(option, "long option");
        self.assign_from(option, arg)
    }

    fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) -> Self::Value {
        trace!(%option, "short option");
        let mut buf = [0; 4];
        self.assign_from(option.encode_utf8(&mut buf), arg)
    }

    fn visit_short_group(self, group: &'arg str) -> Self::Value {
        trace!(group, "short option group");

        // Resolve the whole group before assigning anything
        let members = group
            .char_indices()
            .map(|(i, option)| {
                let flag = self.lookup(&group[i..i + option.len_utf8()])?;

                match flag.kind() {
                    FlagType::Bool => validate::validate(flag, "true").map(|()| flag),
                    _ => Err(ParseError::GroupedNonBooleanFlag {
                        flag: option,
                        group: group.to_owned(),
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        for flag in members {
            self.flags.insert(flag.name().to_owned(), "true".to_owned());
        }

        Ok(())
    }
}

pub(crate) fn parse<'r, S: AsRef<str>>(
    registry: &'r Registry,
    tokens: &[S],
) -> Result<ParseResult<'r>, ParseError> {
    let command = match_command(registry.commands(), tokens);
    let consumed = command.map_or(0, |command| command.path().len());

    match command {
        Some(command) => debug!(path = ?command.path(), "matched command"),
        None => debug!("no command matched"),
    }

    let mut flags = HashMap::new();
    let mut positional = Vec::new();
    let mut arguments = ArgumentsParser::new(tokens[consumed..].iter().map(AsRef::<str>::as_ref));

    while let Some(outcome) = arguments.next_arg(Dispatcher {
        registry,
        command,
        flags: &mut flags,
        positional: &mut positional,
    }) {
        outcome?;
    }

    let double_dash_seen = arguments.double_dash_seen();

    debug!(
        flags = flags.len(),
        positional = positional.len(),
        double_dash_seen,
        "parse complete"
    );

    Ok(ParseResult::new(
        registry,
        command,
        flags,
        positional,
        double_dash_seen,
        tokens.iter().map(|token| token.as_ref().to_owned()).collect(),
    ))
}

use core::fmt;
use std::collections::HashMap;

use crate::command::CommandDefinition;
use crate::flag::{FlagDefinition, FlagValue};
use crate::registry::Registry;
use crate::validate;

/**
The outcome of a successful [`Registry::parse`]. Holds the matched command,
the raw (already validated) value of every flag that appeared, and the
positional arguments in their original order.

The typed accessors ([`bool`][Self::bool], [`string`][Self::string],
[`int`][Self::int], [`uint`][Self::uint], [`float`][Self::float]) never fail.
For a given flag name they return, in order of preference:

1. The value from the command line, if it's present and coerces to the type
2. The flag's default, if it has one of the matching type
3. The type's zero value

Flag names are resolved the same way the parser resolves them: the matched
command's flags shadow global flags, and aliases work too.
*/
#[derive(Clone)]
pub struct ParseResult<'r> {
    registry: &'r Registry,
    command: Option<&'r CommandDefinition>,
    flags: HashMap<String, String>,
    positional: Vec<String>,
    double_dash_seen: bool,
    raw_args: Vec<String>,
}

impl<'r> ParseResult<'r> {
    pub(crate) fn new(
        registry: &'r Registry,
        command: Option<&'r CommandDefinition>,
        flags: HashMap<String, String>,
        positional: Vec<String>,
        double_dash_seen: bool,
        raw_args: Vec<String>,
    ) -> Self {
        Self {
            registry,
            command,
            flags,
            positional,
            double_dash_seen,
            raw_args,
        }
    }

    #[inline]
    #[must_use]
    pub fn command(&self) -> Option<&'r CommandDefinition> {
        self.command
    }

    #[inline]
    #[must_use]
    pub fn command_path(&self) -> Option<&'r [String]> {
        self.command.map(CommandDefinition::path)
    }

    /// Every flag that appeared on the command line, keyed by canonical name
    #[inline]
    #[must_use]
    pub fn flags(&self) -> &HashMap<String, String> {
        &self.flags
    }

    #[inline]
    #[must_use]
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// True if a literal `--` was consumed
    #[inline]
    #[must_use]
    pub fn double_dash_seen(&self) -> bool {
        self.double_dash_seen
    }

    /// The complete, unmodified input
    #[inline]
    #[must_use]
    pub fn raw_args(&self) -> &[String] {
        &self.raw_args
    }

    fn definition(&self, name: &str) -> Option<&'r FlagDefinition> {
        self.registry.find_flag(self.command, name)
    }

    fn default(&self, name: &str) -> Option<&'r FlagValue> {
        self.definition(name)?.default_value()
    }

    /// The raw value given on the command line for this flag, if any
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.flags
            .get(name)
            .or_else(|| self.flags.get(self.definition(name)?.name()))
            .map(String::as_str)
    }

    /// True if the flag appeared on the command line
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.raw(name).is_some()
    }

    #[must_use]
    pub fn bool(&self, name: &str) -> bool {
        match (self.raw(name), self.default(name)) {
            (Some(value), _) => validate::coerce_bool(value),
            (None, Some(&FlagValue::Bool(value))) => value,
            (None, _) => false,
        }
    }

    #[must_use]
    pub fn string(&self, name: &str) -> &str {
        match (self.raw(name), self.default(name)) {
            (Some(value), _) => value,
            (None, Some(FlagValue::String(value))) => value.as_str(),
            (None, _) => "",
        }
    }

    #[must_use]
    pub fn int(&self, name: &str) -> i64 {
        self.raw(name)
            .and_then(|value| value.parse().ok())
            .or_else(|| match self.default(name) {
                Some(&FlagValue::Int(value)) => Some(value),
                _ => None,
            })
            .unwrap_or(0)
    }

    #[must_use]
    pub fn uint(&self, name: &str) -> u64 {
        self.raw(name)
            .and_then(|value| value.parse().ok())
            .or_else(|| match self.default(name) {
                Some(&FlagValue::Uint(value)) => Some(value),
                _ => None,
            })
            .unwrap_or(0)
    }

    #[must_use]
    pub fn float(&self, name: &str) -> f64 {
        self.raw(name)
            .and_then(|value| value.parse().ok())
            .or_else(|| match self.default(name) {
                Some(&FlagValue::Float(value)) => Some(value),
                _ => None,
            })
            .unwrap_or(0.0)
    }
}

impl fmt::Debug for ParseResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseResult")
            .field("command", &self.command_path())
            .field("flags", &self.flags)
            .field("positional", &self.positional)
            .field("double_dash_seen", &self.double_dash_seen)
            .field("raw_args", &self.raw_args)
            .finish()
    }
}

/*!
Error types for [`paws`][crate]. [`ParseError`] is what comes out of
[`Registry::parse`][crate::Registry::parse] and
[`Registry::validate_required`][crate::Registry::validate_required];
[`DefinitionError`] is what comes out of building flags and registering
commands.
 */

use core::error::Error;
use core::num::{ParseFloatError, ParseIntError};

use joinery::JoinableIterator;

use crate::FlagType;

/// A fieldless tag for each [`ParseError`] variant. Useful for mapping errors
/// to exit codes without matching on the payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownFlag,
    MissingValue,
    InvalidFlagValue,
    RequiredFlagMissing,
    GroupedNonBooleanFlag,
}

/**
Errors that occur while parsing a command line. Parsing stops at the first
error; no partial result is produced.
*/
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The flag didn't resolve to any definition, in either the matched
    /// command's scope or the global scope. `flag` is the name as written,
    /// without dashes.
    #[error("unknown flag {flag:?}")]
    UnknownFlag { flag: String },

    /// The flag needs a value and the next argument was absent or looked
    /// like a flag itself.
    #[error("flag {flag:?} requires a value")]
    MissingValue { flag: String },

    /// The value was rejected by the flag's type or constraints.
    #[error("invalid value {value:?} for flag {flag:?}: {reason}")]
    InvalidFlagValue {
        flag: String,
        value: String,
        #[source]
        reason: InvalidValue,
    },

    /// A required flag was absent or empty
    #[error("required flag {flag:?} is missing")]
    RequiredFlagMissing { flag: String },

    /// A short flag inside a group like `-vif` takes a value, so it can't be
    /// grouped.
    #[error("flag {flag:?} takes a value and can't be grouped in \"-{group}\"")]
    GroupedNonBooleanFlag { flag: char, group: String },
}

impl ParseError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownFlag { .. } => ErrorKind::UnknownFlag,
            Self::MissingValue { .. } => ErrorKind::MissingValue,
            Self::InvalidFlagValue { .. } => ErrorKind::InvalidFlagValue,
            Self::RequiredFlagMissing { .. } => ErrorKind::RequiredFlagMissing,
            Self::GroupedNonBooleanFlag { .. } => ErrorKind::GroupedNonBooleanFlag,
        }
    }

    /// The underlying numeric parse error, if the value failed to parse as a
    /// number at all (as opposed to parsing and then failing a constraint).
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidFlagValue { reason, .. } => reason.cause(),
            _ => None,
        }
    }
}

/// The reason a value was rejected by the validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InvalidValue {
    #[error("expected one of true, false, yes, no, t, f, y, n, 1, 0")]
    NotBoolean,

    #[error("must be one of {}", .choices.iter().join_with(", "))]
    NotAChoice { choices: Vec<String> },

    /// The value parsed, but fell outside of the flag's inclusive range. For
    /// unsigned flags, `min` is the effective minimum, never below zero.
    #[error("must be between {min} and {max}")]
    OutOfRange { min: i64, max: i64 },

    /// An unsigned value was written with a `+` or `-` sign
    #[error("unsigned values can't have a sign")]
    Signed,

    #[error("not a valid integer")]
    Int(#[source] ParseIntError),

    #[error("not a valid number")]
    Float(#[source] ParseFloatError),
}

impl InvalidValue {
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Int(err) => Some(err),
            Self::Float(err) => Some(err),
            _ => None,
        }
    }
}

/**
Errors that occur while constructing a [`FlagDefinition`][crate::FlagDefinition]
or registering a command. These are mistakes in the program's own declarations,
not in the user's command line.
*/
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DefinitionError {
    #[error("flag names must not be empty")]
    EmptyName,

    /// Names and aliases can't start with `-` or contain `=`, since neither
    /// could ever be matched on the command line.
    #[error("{name:?} can't be used as a flag name or alias")]
    InvalidName { name: String },

    #[error("flag {flag:?} is a {kind} flag; only string flags can have choices")]
    ChoicesOnNonString { flag: String, kind: FlagType },

    #[error("flag {flag:?} is a {kind} flag; only numeric flags can have a range")]
    RangeOnNonNumeric { flag: String, kind: FlagType },

    #[error("flag {flag:?} has an empty range [{min}, {max}]")]
    EmptyRange { flag: String, min: i64, max: i64 },

    #[error("flag {flag:?} is a {expected} flag, but its default is a {found} value")]
    DefaultTypeMismatch {
        flag: String,
        expected: FlagType,
        found: FlagType,
    },

    #[error("default value for flag {flag:?} is invalid: {reason}")]
    InvalidDefault {
        flag: String,
        #[source]
        reason: InvalidValue,
    },

    #[error("command paths must not be empty")]
    EmptyPath,

    #[error("command path \"{}\" contains an empty token", .path.iter().join_with(" "))]
    EmptyPathToken { path: Vec<String> },

    #[error("command \"{}\" is already registered", .path.iter().join_with(" "))]
    DuplicateCommand { path: Vec<String> },

    #[error(
        "flag {name:?} is declared more than once for command \"{}\"",
        .path.iter().join_with(" ")
    )]
    DuplicateFlag { name: String, path: Vec<String> },
}

/*!
Flag definitions: the declared name, aliases, type, default, and constraints of
a single command-line flag. Definitions are validated once, when they're
constructed, and are immutable afterwards.
 */

use core::fmt::{self, Display};

use crate::errors::DefinitionError;
use crate::validate;

/// The type of value a flag holds. Fixed when the flag is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagType {
    Bool,
    String,
    Int,
    Uint,
    Float,
}

impl FlagType {
    #[inline]
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Uint | Self::Float)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
        }
    }
}

impl Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed value, used for flag defaults. The variant must agree with the
/// [`FlagType`] of the flag it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Bool(bool),
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl FlagValue {
    #[must_use]
    pub const fn flag_type(&self) -> FlagType {
        match self {
            Self::Bool(_) => FlagType::Bool,
            Self::String(_) => FlagType::String,
            Self::Int(_) => FlagType::Int,
            Self::Uint(_) => FlagType::Uint,
            Self::Float(_) => FlagType::Float,
        }
    }
}

impl Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => value.fmt(f),
            Self::String(value) => value.fmt(f),
            Self::Int(value) => value.fmt(f),
            Self::Uint(value) => value.fmt(f),
            Self::Float(value) => value.fmt(f),
        }
    }
}

macro_rules! flag_value_from {
    ($($type:ty => $variant:ident,)*) => {
        $(
            impl From<$type> for FlagValue {
                #[inline]
                fn from(value: $type) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

flag_value_from! {
    bool => Bool,
    &str => String,
    String => String,
    i64 => Int,
    u64 => Uint,
    f64 => Float,
}

/**
An inclusive `[min, max]` bound on a numeric flag. The bounds are integers for
every numeric type; float flags compare against them as `f64`, and uint flags
never accept anything below zero regardless of `min`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagRange {
    pub min: i64,
    pub max: i64,
}

impl FlagRange {
    #[inline]
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

/**
Everything about a flag besides its name and type. Pass this to
[`FlagDefinition::new`], which checks that the pieces are consistent with each
other and with the flag's type.

```
use paws::{FlagDefinition, FlagOptions, FlagRange, FlagType};

let jobs = FlagDefinition::new("jobs", FlagType::Uint, FlagOptions {
    aliases: vec!["j".to_owned()],
    default: Some(4u64.into()),
    range: Some(FlagRange::new(1, 64)),
    ..FlagOptions::default()
})
.unwrap();

assert_eq!(jobs.aliases(), ["j"]);
```
*/
#[derive(Debug, Clone, Default)]
pub struct FlagOptions {
    /// Alternate names, conventionally single characters, usable as `-a`
    /// (or `--a`).
    pub aliases: Vec<String>,

    /// Used by the [`ParseResult`][crate::ParseResult] accessors when the
    /// flag doesn't appear on the command line.
    pub default: Option<FlagValue>,

    /// Checked by [`Registry::validate_required`][crate::Registry::validate_required].
    /// Ignored for bool flags.
    pub required: bool,

    /// Allowed values. Only valid on string flags.
    pub choices: Vec<String>,

    /// Inclusive bound. Only valid on numeric flags.
    pub range: Option<FlagRange>,

    pub help: String,
}

/// The definition of a single flag.
#[derive(Debug, Clone)]
pub struct FlagDefinition {
    name: String,
    aliases: Vec<String>,
    kind: FlagType,
    default: Option<FlagValue>,
    required: bool,
    choices: Vec<String>,
    range: Option<FlagRange>,
    help: String,
}

fn check_name(name: &str) -> Result<(), DefinitionError> {
    match name {
        "" => Err(DefinitionError::EmptyName),
        name if name.starts_with('-') || name.contains('=') => Err(DefinitionError::InvalidName {
            name: name.to_owned(),
        }),
        _ => Ok(()),
    }
}

impl FlagDefinition {
    /// Create a flag from a full set of options, checking that they make
    /// sense for `kind`.
    pub fn new(
        name: impl Into<String>,
        kind: FlagType,
        options: FlagOptions,
    ) -> Result<Self, DefinitionError> {
        let name = name.into();
        let FlagOptions {
            aliases,
            default,
            required,
            choices,
            range,
            help,
        } = options;

        check_name(&name)?;
        aliases.iter().try_for_each(|alias| check_name(alias))?;

        if !choices.is_empty() && kind != FlagType::String {
            return Err(DefinitionError::ChoicesOnNonString { flag: name, kind });
        }

        if let Some(FlagRange { min, max }) = range {
            if !kind.is_numeric() {
                return Err(DefinitionError::RangeOnNonNumeric { flag: name, kind });
            }

            if min > max {
                return Err(DefinitionError::EmptyRange {
                    flag: name,
                    min,
                    max,
                });
            }
        }

        let flag = Self {
            name,
            aliases,
            kind,
            default: None,
            required,
            choices,
            range,
            help,
        };

        match default {
            None => Ok(flag),
            Some(default) if default.flag_type() != kind => {
                Err(DefinitionError::DefaultTypeMismatch {
                    flag: flag.name,
                    expected: kind,
                    found: default.flag_type(),
                })
            }
            Some(default) => match validate::check(&flag, &default.to_string()) {
                Ok(()) => Ok(Self {
                    default: Some(default),
                    ..flag
                }),
                Err(reason) => Err(DefinitionError::InvalidDefault {
                    flag: flag.name,
                    reason,
                }),
            },
        }
    }

    fn typed(name: &str, kind: FlagType, aliases: &[&str]) -> Self {
        let options = FlagOptions {
            aliases: aliases.iter().map(|&alias| alias.to_owned()).collect(),
            ..FlagOptions::default()
        };

        match Self::new(name, kind, options) {
            Ok(flag) => flag,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a bool flag with no default, constraints, or help.
    ///
    /// # Panics
    ///
    /// If `name` or any alias is empty, starts with `-`, or contains `=`. The
    /// same goes for the other typed constructors.
    #[must_use]
    pub fn bool(name: &str, aliases: &[&str]) -> Self {
        Self::typed(name, FlagType::Bool, aliases)
    }

    #[must_use]
    pub fn string(name: &str, aliases: &[&str]) -> Self {
        Self::typed(name, FlagType::String, aliases)
    }

    #[must_use]
    pub fn int(name: &str, aliases: &[&str]) -> Self {
        Self::typed(name, FlagType::Int, aliases)
    }

    #[must_use]
    pub fn uint(name: &str, aliases: &[&str]) -> Self {
        Self::typed(name, FlagType::Uint, aliases)
    }

    #[must_use]
    pub fn float(name: &str, aliases: &[&str]) -> Self {
        Self::typed(name, FlagType::Float, aliases)
    }

    /// Mark this flag as required. Has no effect on bool flags.
    #[must_use]
    pub fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    #[must_use]
    pub fn with_help(self, help: impl Into<String>) -> Self {
        Self {
            help: help.into(),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> FlagType {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn default_value(&self) -> Option<&FlagValue> {
        self.default.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[inline]
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[inline]
    #[must_use]
    pub fn range(&self) -> Option<FlagRange> {
        self.range
    }

    #[inline]
    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// The flag's name, followed by its aliases
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// True if `name` is this flag's name or one of its aliases
    #[must_use]
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|alias| alias == name)
    }
}

/// Find the first flag in `flags` that answers to `name`
pub(crate) fn find<'a>(flags: &'a [FlagDefinition], name: &str) -> Option<&'a FlagDefinition> {
    flags.iter().find(|flag| flag.answers_to(name))
}

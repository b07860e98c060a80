/*!
A registry-driven command-line parser. Declare your global flags and your
commands (each identified by a literal path like `git commit`, with flags of
its own) in a [`Registry`], then [`parse`][Registry::parse] a command line
into a [`ParseResult`].

Parsing handles:

- Longest-prefix command matching: with both `git` and `git commit`
  registered, `git commit --amend` matches `git commit`.
- `--long value`, `--long=value`, `-s value`, and grouped bool shorts like
  `-vif`.
- `--` to end flag parsing; everything after it is positional.
- Typed validation of every value against the flag's [`FlagType`], choices,
  and range.

Defaults are applied lazily by the typed accessors on [`ParseResult`], which
never fail. Required flags are checked in a separate, explicit step with
[`Registry::validate_required`].

```
use paws::{FlagDefinition, FlagOptions, FlagRange, FlagType, Registry};

let mut registry = Registry::new();
registry.add_flags([
    FlagDefinition::bool("verbose", &["v"]),
    FlagDefinition::new("count", FlagType::Int, FlagOptions {
        range: Some(FlagRange::new(1, 10)),
        ..FlagOptions::default()
    })
    .unwrap(),
]);

let result = registry.parse(&["--count", "5", "extra"]).unwrap();
assert_eq!(result.int("count"), 5);
assert_eq!(result.positional(), ["extra"]);
assert!(!result.bool("verbose"));

let error = registry.parse(&["--count", "11"]).unwrap_err();
assert_eq!(error.kind(), paws::ErrorKind::InvalidFlagValue);
```
*/

mod command;
pub mod errors;
mod flag;
mod matcher;
mod registry;
mod result;
pub mod validate;

pub use command::CommandDefinition;
pub use errors::{DefinitionError, ErrorKind, InvalidValue, ParseError};
pub use flag::{FlagDefinition, FlagOptions, FlagRange, FlagType, FlagValue};
pub use registry::Registry;
pub use result::ParseResult;

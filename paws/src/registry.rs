use std::collections::HashSet;

use tracing::warn;

use crate::command::CommandDefinition;
use crate::errors::{DefinitionError, ParseError};
use crate::flag::{self, FlagDefinition, FlagType};
use crate::matcher;
use crate::result::ParseResult;

/**
The set of commands and global flags that a command line is parsed against.

A registry is populated once, at startup, and then only read. Parsing takes
`&self`, so any number of parses can share one registry, across threads if
need be.

```
use paws::{FlagDefinition, Registry};

let mut registry = Registry::new();
registry.add_flags([FlagDefinition::bool("verbose", &["v"])]);
registry
    .add_command(["git", "commit"], [FlagDefinition::string("message", &["m"])])
    .unwrap();

let result = registry.parse(&["git", "commit", "-v", "-m", "fix"]).unwrap();

assert_eq!(result.command_path().unwrap(), ["git", "commit"]);
assert!(result.bool("verbose"));
assert_eq!(result.string("message"), "fix");
```
*/
#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: Vec<CommandDefinition>,
    global_flags: Vec<FlagDefinition>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /**
    Register a command. Paths may be prefixes of one another (`git` and
    `git commit`), but must not be empty or identical to an existing path.
    Flags within a single command must not share names or aliases.
    */
    pub fn add_command<S: Into<String>>(
        &mut self,
        path: impl IntoIterator<Item = S>,
        flags: impl IntoIterator<Item = FlagDefinition>,
    ) -> Result<(), DefinitionError> {
        let path: Vec<String> = path.into_iter().map(Into::into).collect();
        let flags: Vec<FlagDefinition> = flags.into_iter().collect();

        if path.is_empty() {
            return Err(DefinitionError::EmptyPath);
        }

        if path.iter().any(String::is_empty) {
            return Err(DefinitionError::EmptyPathToken { path });
        }

        if self.commands.iter().any(|command| command.path() == path) {
            return Err(DefinitionError::DuplicateCommand { path });
        }

        if let Some(name) = first_duplicate_name(&flags) {
            return Err(DefinitionError::DuplicateFlag { name, path });
        }

        self.commands.push(CommandDefinition::new(path, flags));
        Ok(())
    }

    /// Add global flags, usable with any command (or none). If a name or
    /// alias collides with an earlier global flag, the earlier flag wins.
    pub fn add_flags(&mut self, flags: impl IntoIterator<Item = FlagDefinition>) {
        for flag in flags {
            for name in flag.names() {
                if let Some(existing) = flag::find(&self.global_flags, name) {
                    warn!(
                        flag = flag.name(),
                        name,
                        shadowed_by = existing.name(),
                        "global flag name is already taken; the earlier flag wins"
                    );
                }
            }

            self.global_flags.push(flag);
        }
    }

    #[inline]
    #[must_use]
    pub fn commands(&self) -> &[CommandDefinition] {
        &self.commands
    }

    #[inline]
    #[must_use]
    pub fn global_flags(&self) -> &[FlagDefinition] {
        &self.global_flags
    }

    /// Find the command registered with exactly this path
    #[must_use]
    pub fn find_command<S: AsRef<str>>(&self, path: &[S]) -> Option<&CommandDefinition> {
        self.commands.iter().find(|command| {
            command.path().len() == path.len() && command.is_prefix_of(path)
        })
    }

    /// Look up a flag by name or alias. The command's own flags shadow global
    /// flags.
    #[must_use]
    pub fn find_flag<'r>(
        &'r self,
        command: Option<&'r CommandDefinition>,
        name: &str,
    ) -> Option<&'r FlagDefinition> {
        command
            .and_then(|command| command.find_flag(name))
            .or_else(|| flag::find(&self.global_flags, name))
    }

    /**
    Parse a command line (excluding the program name). The longest command
    path that prefixes `tokens` is matched first; everything after it is
    parsed as flags and positional arguments.

    Parsing stops at the first error. Required flags are *not* checked here;
    see [`validate_required`][Self::validate_required].
    */
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseResult<'_>, ParseError> {
        matcher::parse(self, tokens)
    }

    /**
    Check that every required, non-bool flag has a non-empty value in
    `result`. Global flags are checked first, then the matched command's
    flags; the first missing flag is reported. Global flags that are shadowed
    by a command flag of the same name are skipped.

    Bool flags are never considered required, since an absent bool flag is
    indistinguishable from an explicit `false`.
    */
    pub fn validate_required(&self, result: &ParseResult<'_>) -> Result<(), ParseError> {
        let command = result.command();

        let globals = self.global_flags.iter().filter(|flag| {
            command.is_none_or(|command| command.find_flag(flag.name()).is_none())
        });
        let locals = command.into_iter().flat_map(|command| command.flags());

        match globals
            .chain(locals)
            .filter(|flag| flag.is_required() && flag.kind() != FlagType::Bool)
            .find(|flag| result.raw(flag.name()).is_none_or(str::is_empty))
        {
            Some(flag) => Err(ParseError::RequiredFlagMissing {
                flag: flag.name().to_owned(),
            }),
            None => Ok(()),
        }
    }
}

fn first_duplicate_name(flags: &[FlagDefinition]) -> Option<String> {
    let mut seen = HashSet::new();

    flags
        .iter()
        .flat_map(FlagDefinition::names)
        .find(|&name| !seen.insert(name))
        .map(str::to_owned)
}

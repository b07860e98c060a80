use crate::flag::{self, FlagDefinition};

/**
A command, identified by a literal path of tokens (like `["git", "commit"]`),
with its own set of flags. Command flags live in their own namespace, separate
from the registry's global flags, and shadow global flags with the same name.
*/
#[derive(Debug, Clone)]
pub struct CommandDefinition {
    path: Vec<String>,
    flags: Vec<FlagDefinition>,
}

impl CommandDefinition {
    pub(crate) fn new(path: Vec<String>, flags: Vec<FlagDefinition>) -> Self {
        Self { path, flags }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn flags(&self) -> &[FlagDefinition] {
        &self.flags
    }

    /// Find one of this command's own flags by name or alias
    #[must_use]
    pub fn find_flag(&self, name: &str) -> Option<&FlagDefinition> {
        flag::find(&self.flags, name)
    }

    /// True if this command's path is a token-for-token prefix of `tokens`
    #[must_use]
    pub fn is_prefix_of<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        self.path.len() <= tokens.len()
            && self
                .path
                .iter()
                .zip(tokens)
                .all(|(part, token)| part == token.as_ref())
    }
}

/// Deepest bracket or parenthesis nesting accepted by default.
pub const DEFAULT_MAX_NESTING: usize = 64;

/// Name reported in diagnostics when the caller does not provide one.
pub const DEFAULT_SOURCE_NAME: &str = "<program>";

/// Settings shared by every phase of a run.
///
/// A `Config` is built once by the driver (usually from command-line flags)
/// and handed to a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name shown in the `File <name>, line <N>` part of diagnostics.
    pub source_name: String,
    /// Print the value of every statement, not only `OUTPUT` statements.
    pub debug:       bool,
    /// Deepest `[...]` or `(...)` nesting the lexer accepts, and deepest
    /// nesting of groups and `LENGTH` operands the parser accepts per line.
    pub max_nesting: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { source_name: DEFAULT_SOURCE_NAME.to_string(),
               debug:       false,
               max_nesting: DEFAULT_MAX_NESTING, }
    }
}

impl Config {
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }
}

//! Runtime configuration derived from CLI arguments.

use crate::constants::DEFAULT_CONFIG_FILE;
use crate::git::{self, GitLogger};

/// Runtime configuration derived from CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Controls the verbosity level of CLI output.
    pub verbosity: Verbosity,
    /// Treat a non-zero git exit status as a failure of the current entry.
    pub strict: bool,
    /// Print git commands instead of running them.
    pub dry_run: bool,
    /// Name of the submodule definition file, relative to the working directory.
    pub config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            strict: false,
            dry_run: false,
            config_file: DEFAULT_CONFIG_FILE.to_string(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Returns the git logger matching the verbosity settings.
    ///
    /// Config only picks the callback; the logging itself lives in the
    /// git module.
    #[must_use]
    pub fn git_logger(&self) -> GitLogger {
        if self.is_verbose() {
            git::verbose_logger
        } else {
            git::no_op_logger
        }
    }
}

/// Verbosity level for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

//! Application-wide constants.

/// Default name of the submodule definition file.
pub const DEFAULT_CONFIG_FILE: &str = ".gitmodules";

/// Program invoked for every version-control operation.
pub const GIT_PROGRAM: &str = "git";

/// Branch names treated as a standard primary branch.
pub const MASTER_BRANCH: &str = "master";
pub const MAIN_BRANCH: &str = "main";

/// Branch used when `git branch -a` yields nothing usable.
pub const FALLBACK_BRANCH: &str = MASTER_BRANCH;

/// Width of the right-aligned arrow on the second progress line.
pub const PROGRESS_INDENT: usize = 11;

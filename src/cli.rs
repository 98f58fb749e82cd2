//! Command-line arguments.

use crate::config::{Config, Verbosity};
use crate::constants::DEFAULT_CONFIG_FILE;
use clap::Parser;
use std::path::PathBuf;

/// Pull the current repository and bring every submodule listed in
/// .gitmodules up to date.
#[derive(Parser, Debug)]
#[command(name = "gitupdate", version, about)]
pub struct Cli {
    /// Run against DIR instead of the current directory
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Submodule definition file, relative to the working directory
    #[arg(short, long, value_name = "NAME", default_value = DEFAULT_CONFIG_FILE)]
    pub file: String,

    /// Only print errors and the final count
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log every git command with its exit status
    #[arg(short, long)]
    pub verbose: bool,

    /// Fail a submodule, and the run, when a git command exits non-zero
    #[arg(long)]
    pub strict: bool,

    /// Print git commands instead of running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl Cli {
    #[must_use]
    pub fn config(&self) -> Config {
        let verbosity = if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Config {
            verbosity,
            strict: self.strict,
            dry_run: self.dry_run,
            config_file: self.file.clone(),
        }
    }
}

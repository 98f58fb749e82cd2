//! Git command wrappers.
//!
//! This module provides a thin wrapper around the git CLI. Every command
//! runs in an explicit directory; nothing here changes the process working
//! directory.

use crate::constants::GIT_PROGRAM;
use anyhow::Context;
use colored::Colorize;
use std::fmt;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Callback invoked after every git command with its directory, arguments
/// and exit status.
pub type GitLogger = fn(&Path, &[&str], &RunStatus);

/// Prints each git command and its status to stderr.
pub fn verbose_logger(dir: &Path, args: &[&str], status: &RunStatus) {
    let command = format!("git {}", args.join(" "));
    let location = format!("({})", dir.display());
    match status {
        RunStatus::Success => {
            eprintln!("  {} {} {}", "$".dimmed(), command, location.dimmed())
        }
        other => eprintln!(
            "  {} {} {} {}",
            "$".dimmed(),
            command,
            location.dimmed(),
            other.to_string().yellow()
        ),
    }
}

pub fn no_op_logger(_dir: &Path, _args: &[&str], _status: &RunStatus) {}

/// How a fire-and-forget git invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// The process ran but exited unsuccessfully. `None` when it was killed
    /// by a signal.
    NonZeroExit(Option<i32>),
    /// The process could not be started at all.
    SpawnFailed(String),
}

impl RunStatus {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Success)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Success => write!(f, "ok"),
            RunStatus::NonZeroExit(Some(code)) => write!(f, "exited with status {}", code),
            RunStatus::NonZeroExit(None) => write!(f, "terminated by signal"),
            RunStatus::SpawnFailed(err) => write!(f, "failed to start: {}", err),
        }
    }
}

/// Executes git on behalf of the orchestrator.
///
/// Implementations must not touch the process working directory: `dir` is
/// the directory the command applies to.
pub trait Runner {
    /// Runs git with inherited stdio and reports how it ended.
    fn run(&self, dir: &Path, args: &[&str]) -> RunStatus;

    /// Runs git and returns its stdout, whatever the exit status.
    fn capture(&self, dir: &Path, args: &[&str]) -> anyhow::Result<String>;
}

/// Runs real git processes.
#[derive(Debug, Clone, Copy)]
pub struct GitRunner {
    logger: GitLogger,
}

impl GitRunner {
    pub fn new(logger: GitLogger) -> Self {
        Self { logger }
    }
}

impl Default for GitRunner {
    fn default() -> Self {
        Self::new(no_op_logger)
    }
}

impl Runner for GitRunner {
    fn run(&self, dir: &Path, args: &[&str]) -> RunStatus {
        let status = match git_command(dir, args).status() {
            Ok(exit) if exit.success() => RunStatus::Success,
            Ok(exit) => RunStatus::NonZeroExit(exit.code()),
            Err(err) => RunStatus::SpawnFailed(err.to_string()),
        };
        (self.logger)(dir, args, &status);
        status
    }

    fn capture(&self, dir: &Path, args: &[&str]) -> anyhow::Result<String> {
        let output = git_output(dir, args);
        let status = match &output {
            Ok(out) if out.status.success() => RunStatus::Success,
            Ok(out) => RunStatus::NonZeroExit(out.status.code()),
            Err(err) => RunStatus::SpawnFailed(err.to_string()),
        };
        (self.logger)(dir, args, &status);

        let output = output?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Prints the commands that would run and reports success for each.
///
/// Captured commands still run for real: they only read repository state
/// and their output drives branch detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRunner {
    inner: GitRunner,
}

impl DryRunRunner {
    pub fn new(logger: GitLogger) -> Self {
        Self {
            inner: GitRunner::new(logger),
        }
    }
}

impl Runner for DryRunRunner {
    fn run(&self, dir: &Path, args: &[&str]) -> RunStatus {
        println!(
            "{} git {} {}",
            "would run:".cyan(),
            args.join(" "),
            format!("({})", dir.display()).dimmed()
        );
        RunStatus::Success
    }

    fn capture(&self, dir: &Path, args: &[&str]) -> anyhow::Result<String> {
        self.inner.capture(dir, args)
    }
}

fn git_command(dir: &Path, args: &[&str]) -> Command {
    let mut command = Command::new(GIT_PROGRAM);
    command.current_dir(dir).args(args);
    command
}

fn git_output(dir: &Path, args: &[&str]) -> anyhow::Result<Output> {
    git_command(dir, args)
        .stdin(Stdio::null())
        .output()
        .context("Failed to execute git command")
}

/// Runs git and returns its trimmed stdout, failing on a non-zero exit.
pub fn run_git(repo: &Path, args: &[&str]) -> anyhow::Result<String> {
    let output = git_output(repo, args)?;

    if output.status.success() {
        let result = String::from_utf8_lossy(&output.stdout);
        Ok(result.as_ref().trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git {} failed: {}", args.join(" "), stderr)
    }
}

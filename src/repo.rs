// Per-submodule update logic, result types

use crate::config::Config;
use crate::constants::{FALLBACK_BRANCH, MAIN_BRANCH, MASTER_BRANCH};
use crate::git::{RunStatus, Runner};
use crate::gitmodules::{SubmoduleEntry, SubmoduleMap};
use crate::paths;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStep {
    Started { name: String, url: Option<String> },
    EnteringDirectory { dir: PathBuf },
    DetectingBranch,
    NonstandardBranch { branch: String },
    CheckingOut { branch: String, force: bool },
    Pulling { source: Option<(String, String)> },
    Completed,
}

impl fmt::Display for UpdateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateStep::Started { name, .. } => write!(f, "Updating {}", name),
            UpdateStep::EnteringDirectory { dir } => write!(f, "Entering {}", dir.display()),
            UpdateStep::DetectingBranch => write!(f, "Detecting primary branch"),
            UpdateStep::NonstandardBranch { branch } => {
                write!(f, "Using nonstandard branch, {}", branch)
            }
            UpdateStep::CheckingOut { branch, force: false } => write!(f, "Checking out {}", branch),
            UpdateStep::CheckingOut { branch, force: true } => {
                write!(f, "Force checking out {}", branch)
            }
            UpdateStep::Pulling { source: None } => write!(f, "Pulling"),
            UpdateStep::Pulling {
                source: Some((url, branch)),
            } => write!(f, "Pulling {} {}", url, branch),
            UpdateStep::Completed => write!(f, "Completed"),
        }
    }
}

/// Receives progress for each submodule as it is updated.
pub trait UpdateCallbacks {
    fn on_step(&self, step: &UpdateStep);
    fn on_complete(&self, result: &UpdateResult);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    pub name: String,
    pub outcome: UpdateOutcome,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(UpdateSuccess),
    Skipped(SkipReason),
    Failed(UpdateFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSuccess {
    /// Branch reported by `git branch -a`, or the fallback.
    pub detected_branch: String,
    /// Branch actually checked out.
    pub branch: String,
    pub shallow: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingPath { path: Option<String> },
    MissingUrl,
    EnterDirectory { path: PathBuf, error: String },
}

impl SkipReason {
    /// A missing url is expected to have been reported while parsing.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, SkipReason::MissingUrl)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingPath { path } => write!(
                f,
                "could not determine the directory for the supplied path: {}",
                path.as_deref().unwrap_or("<none>")
            ),
            SkipReason::MissingUrl => write!(f, "no url"),
            SkipReason::EnterDirectory { path, error } => write!(
                f,
                "could not switch directory to the module at the supplied path: {} ({})",
                path.display(),
                error
            ),
        }
    }
}

/// A git command that exited unsuccessfully in strict mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFailure {
    pub step: UpdateStep,
    pub status: RunStatus,
}

impl fmt::Display for UpdateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.step, self.status)
    }
}

/// Extracts the primary branch from `git branch -a` output: the first line
/// with any `*` marker and surrounding spaces removed.
#[must_use]
pub fn primary_branch(listing: &str) -> Option<String> {
    let first = listing.split('\n').next()?;
    let branch = first.replace('*', "");
    let branch = branch.trim_matches(' ');
    (!branch.is_empty()).then(|| branch.to_string())
}

/// Runs `git branch -a` in `dir`, falling back to `master`.
pub fn detect_primary_branch(runner: &dyn Runner, dir: &Path) -> String {
    runner
        .capture(dir, &["branch", "-a"])
        .ok()
        .and_then(|listing| primary_branch(&listing))
        .unwrap_or_else(|| FALLBACK_BRANCH.to_string())
}

fn is_standard_branch(branch: &str) -> bool {
    branch == MASTER_BRANCH || branch == MAIN_BRANCH
}

/// Updates every entry in file order. A skipped or failed entry never stops
/// the loop.
pub fn update_modules<C>(
    modules: &SubmoduleMap,
    runner: &dyn Runner,
    callbacks: &C,
    config: &Config,
) -> Vec<UpdateResult>
where
    C: UpdateCallbacks + ?Sized,
{
    modules
        .iter()
        .map(|entry| {
            let result = update(entry, runner, callbacks, config);
            callbacks.on_complete(&result);
            result
        })
        .collect()
}

pub fn update<C>(
    entry: &SubmoduleEntry,
    runner: &dyn Runner,
    callbacks: &C,
    config: &Config,
) -> UpdateResult
where
    C: UpdateCallbacks + ?Sized,
{
    let start = Instant::now();
    let outcome = do_update(entry, runner, callbacks, config);
    UpdateResult {
        name: entry.name.clone(),
        outcome,
        duration: start.elapsed(),
    }
}

fn execute(
    runner: &dyn Runner,
    dir: &Path,
    args: &[&str],
    step: UpdateStep,
    config: &Config,
) -> Result<(), UpdateFailure> {
    let status = runner.run(dir, args);
    if config.strict && !status.is_success() {
        return Err(UpdateFailure { step, status });
    }
    Ok(())
}

fn do_update<C>(
    entry: &SubmoduleEntry,
    runner: &dyn Runner,
    callbacks: &C,
    config: &Config,
) -> UpdateOutcome
where
    C: UpdateCallbacks + ?Sized,
{
    callbacks.on_step(&UpdateStep::Started {
        name: entry.name.clone(),
        url: entry.url.clone(),
    });

    let Some(path) = entry.path.as_deref().filter(|p| p.is_dir()) else {
        return UpdateOutcome::Skipped(SkipReason::MissingPath {
            path: entry.raw_path.clone(),
        });
    };

    let Some(url) = entry.url.as_deref() else {
        return UpdateOutcome::Skipped(SkipReason::MissingUrl);
    };

    callbacks.on_step(&UpdateStep::EnteringDirectory {
        dir: path.to_path_buf(),
    });
    let dir = match paths::enter_directory(path) {
        Ok(dir) => dir,
        Err(err) => {
            return UpdateOutcome::Skipped(SkipReason::EnterDirectory {
                path: path.to_path_buf(),
                error: format!("{:#}", err),
            });
        }
    };

    callbacks.on_step(&UpdateStep::DetectingBranch);
    let detected_branch = detect_primary_branch(runner, &dir);
    if !is_standard_branch(&detected_branch) {
        callbacks.on_step(&UpdateStep::NonstandardBranch {
            branch: detected_branch.clone(),
        });
    }

    let branch = entry
        .branch
        .clone()
        .unwrap_or_else(|| detected_branch.clone());
    let shallow = entry.is_shallow();

    match dispatch(&dir, url, &branch, shallow, runner, callbacks, config) {
        Ok(()) => {
            callbacks.on_step(&UpdateStep::Completed);
            UpdateOutcome::Updated(UpdateSuccess {
                detected_branch,
                branch,
                shallow,
            })
        }
        Err(failure) => UpdateOutcome::Failed(failure),
    }
}

fn dispatch<C>(
    dir: &Path,
    url: &str,
    branch: &str,
    shallow: bool,
    runner: &dyn Runner,
    callbacks: &C,
    config: &Config,
) -> Result<(), UpdateFailure>
where
    C: UpdateCallbacks + ?Sized,
{
    let checkout = UpdateStep::CheckingOut {
        branch: branch.to_string(),
        force: shallow,
    };
    callbacks.on_step(&checkout);
    if shallow {
        execute(runner, dir, &["checkout", "-f", "-B", branch], checkout, config)?;
    } else {
        execute(runner, dir, &["checkout", branch], checkout, config)?;
    }

    if shallow {
        let pull = UpdateStep::Pulling {
            source: Some((url.to_string(), branch.to_string())),
        };
        callbacks.on_step(&pull);
        execute(runner, dir, &["pull", url, branch], pull, config)
    } else {
        let pull = UpdateStep::Pulling { source: None };
        callbacks.on_step(&pull);
        execute(runner, dir, &["pull"], pull, config)
    }
}

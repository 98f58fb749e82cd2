//! Top-level run: parse the config, initialize submodules, update each one.

use crate::config::Config;
use crate::git::{RunStatus, Runner};
use crate::gitmodules::{self, ParseWarning};
use crate::repo::{self, UpdateCallbacks, UpdateOutcome, UpdateResult};
use std::path::{Path, PathBuf};

/// Commands run in the top-level repository before any submodule update.
pub const INIT_COMMANDS: [&[&str]; 3] = [
    &["pull"],
    &["submodule", "init"],
    &["submodule", "update", "--init", "--merge"],
];

/// Driver-level events on top of the per-submodule ones.
pub trait SyncCallbacks: UpdateCallbacks {
    fn on_missing_config(&self, path: &Path);
    fn on_parse_warning(&self, warning: &ParseWarning);
    fn on_init_command(&self, args: &[&str], status: &RunStatus);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub config_path: PathBuf,
    /// False when the config file was missing and nothing ran.
    pub modules_found: bool,
    pub init: Vec<RunStatus>,
    pub results: Vec<UpdateResult>,
    /// Whether the process working directory is still the starting one.
    pub restored_dir: bool,
}

impl SyncReport {
    #[must_use]
    pub fn updated_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, UpdateOutcome::Updated(_)))
            .count()
    }

    /// True when any top-level or submodule command failed. Only strict mode
    /// turns this into a non-zero exit.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.init.iter().any(|s| !s.is_success())
            || self
                .results
                .iter()
                .any(|r| matches!(r.outcome, UpdateOutcome::Failed(_)))
    }
}

/// Runs one full pass against `cwd`.
///
/// Errors only when an existing config file cannot be read; every other
/// problem is reported through `callbacks` and recorded in the report.
pub fn sync<C>(
    cwd: &Path,
    runner: &dyn Runner,
    callbacks: &C,
    config: &Config,
) -> anyhow::Result<SyncReport>
where
    C: SyncCallbacks + ?Sized,
{
    let starting_dir = std::env::current_dir().ok();
    let config_path = cwd.join(&config.config_file);

    let Some(parsed) = gitmodules::collect_modules(cwd, &config.config_file)? else {
        callbacks.on_missing_config(cwd);
        return Ok(SyncReport {
            config_path,
            modules_found: false,
            init: Vec::new(),
            results: Vec::new(),
            restored_dir: still_in(starting_dir.as_deref()),
        });
    };

    for warning in &parsed.warnings {
        callbacks.on_parse_warning(warning);
    }

    let init = INIT_COMMANDS
        .iter()
        .map(|args| {
            let status = runner.run(cwd, args);
            callbacks.on_init_command(args, &status);
            status
        })
        .collect();

    let results = repo::update_modules(&parsed.modules, runner, callbacks, config);

    Ok(SyncReport {
        config_path,
        modules_found: true,
        init,
        results,
        restored_dir: still_in(starting_dir.as_deref()),
    })
}

fn still_in(starting_dir: Option<&Path>) -> bool {
    match (starting_dir, std::env::current_dir().ok()) {
        (Some(start), Some(now)) => start == now,
        _ => false,
    }
}

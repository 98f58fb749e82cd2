//! Colored terminal output and summary formatting.
//!
//! Progress lines go to stdout, diagnostics to stderr.

use crate::config::Config;
use crate::constants::PROGRESS_INDENT;
use crate::git::RunStatus;
use crate::gitmodules::ParseWarning;
use crate::repo::{UpdateCallbacks, UpdateOutcome, UpdateResult, UpdateStep};
use crate::sync::{SyncCallbacks, SyncReport};
use colored::Colorize;
use std::path::Path;
use std::time::Duration;

/// Callbacks that discard everything. Use when no output is wanted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpCallbacks;

impl UpdateCallbacks for NoOpCallbacks {
    fn on_step(&self, _step: &UpdateStep) {}
    fn on_complete(&self, _result: &UpdateResult) {}
}

impl SyncCallbacks for NoOpCallbacks {
    fn on_missing_config(&self, _path: &Path) {}
    fn on_parse_warning(&self, _warning: &ParseWarning) {}
    fn on_init_command(&self, _args: &[&str], _status: &RunStatus) {}
}

/// Prints progress and diagnostics according to the verbosity settings.
pub struct TerminalCallbacks {
    config: Config,
}

impl TerminalCallbacks {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl UpdateCallbacks for TerminalCallbacks {
    fn on_step(&self, step: &UpdateStep) {
        if self.config.is_quiet() {
            return;
        }
        match step {
            UpdateStep::Started { name, url } => print_progress(name, url.as_deref()),
            UpdateStep::NonstandardBranch { .. } => {
                eprintln!("{} {}", "notice:".yellow(), step)
            }
            other if self.config.is_verbose() => {
                eprintln!("  {}...", other.to_string().dimmed())
            }
            _ => {}
        }
    }

    fn on_complete(&self, result: &UpdateResult) {
        match &result.outcome {
            UpdateOutcome::Updated(_) => {
                if self.config.is_verbose() {
                    eprintln!(
                        "  {} {} in {}",
                        "✓".green(),
                        result.name,
                        format_duration(result.duration).dimmed()
                    );
                }
            }
            UpdateOutcome::Skipped(reason) => {
                if !reason.is_silent() && !self.config.is_quiet() {
                    eprintln!("{} {}", "skipped:".yellow(), reason);
                }
            }
            UpdateOutcome::Failed(failure) => {
                eprintln!("{} {}: {}", "error:".red().bold(), result.name, failure);
            }
        }
    }
}

impl SyncCallbacks for TerminalCallbacks {
    fn on_missing_config(&self, path: &Path) {
        if self.config.is_quiet() {
            return;
        }
        println!(
            "No {} found in {}\nNothing to update...",
            self.config.config_file,
            path.display()
        );
    }

    fn on_parse_warning(&self, warning: &ParseWarning) {
        if self.config.is_quiet() {
            return;
        }
        eprintln!("{} {}", "warning:".yellow(), warning);
    }

    fn on_init_command(&self, args: &[&str], status: &RunStatus) {
        if status.is_success() || self.config.is_quiet() {
            return;
        }
        eprintln!("{} git {}: {}", "warning:".yellow(), args.join(" "), status);
    }
}

fn print_progress(name: &str, url: Option<&str>) {
    println!("{} {}", "Updating".cyan(), url.unwrap_or("None"));
    println!(
        "{} {}",
        format!("{:>width$}", "=>", width = PROGRESS_INDENT).dimmed(),
        name.white().bold()
    );
}

pub fn print_working_dir(path: &Path, config: &Config) {
    if !config.is_verbose() {
        return;
    }
    println!(
        "{} {}",
        "Working in:".cyan(),
        path.display().to_string().white().bold()
    )
}

pub fn print_summary(report: &SyncReport, duration: Duration, config: &Config) {
    if !report.modules_found {
        return;
    }
    if config.is_quiet() {
        println!(
            "{}/{} submodules updated",
            report.updated_count(),
            report.results.len()
        );
    } else {
        println!(
            "{}: {}/{} submodules updated in {}",
            "Total".white().bold(),
            report.updated_count(),
            report.results.len(),
            format_duration(duration)
        );
    }
}

fn format_duration(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f32())
}

use clap::Parser;
use git_submodule_sync::cli::Cli;
use git_submodule_sync::git::{DryRunRunner, GitRunner, Runner};
use git_submodule_sync::output::{self, TerminalCallbacks};
use git_submodule_sync::sync;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    let cwd = match &cli.dir {
        Some(dir) => std::path::absolute(dir)?,
        None => std::env::current_dir()?,
    };
    output::print_working_dir(&cwd, &config);

    let runner: Box<dyn Runner> = if config.dry_run {
        Box::new(DryRunRunner::new(config.git_logger()))
    } else {
        Box::new(GitRunner::new(config.git_logger()))
    };
    let callbacks = TerminalCallbacks::new(config.clone());

    let start = Instant::now();
    let report = sync::sync(&cwd, runner.as_ref(), &callbacks, &config)?;
    output::print_summary(&report, start.elapsed(), &config);

    if config.strict && report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}

//! Test infrastructure for git-submodule-sync integration tests.
#![allow(dead_code)]

use anyhow::Result;
use git_submodule_sync::git::{RunStatus, Runner, run_git};
use git_submodule_sync::gitmodules::{self, SubmoduleMap};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary git repository for testing.
/// Automatically cleaned up when dropped.
pub struct TestRepo {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestRepo {
    /// Creates a new test repository with an initial commit on `branch`.
    pub fn new(branch: &str) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();

        run_git(&path, &["init", "-b", branch])?;

        run_git(&path, &["config", "user.email", "test@example.com"])?;
        run_git(&path, &["config", "user.name", "Test User"])?;

        std::fs::write(path.join("README.md"), "# Test Repo\n")?;
        run_git(&path, &["add", "README.md"])?;
        run_git(&path, &["commit", "-m", "Initial commit"])?;

        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Creates a test repository whose `branch` tracks a bare remote.
    /// Returns the repo and the remote TempDir (must be kept alive).
    pub fn with_remote(branch: &str) -> Result<(Self, TempDir)> {
        let remote_dir = TempDir::new()?;
        run_git(remote_dir.path(), &["init", "--bare"])?;

        let local = Self::new(branch)?;

        run_git(
            &local.path,
            &["remote", "add", "origin", remote_dir.path().to_str().unwrap()],
        )?;
        run_git(&local.path, &["push", "-u", "origin", branch])?;

        Ok((local, remote_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn create_branch(&self, name: &str) -> Result<()> {
        run_git(&self.path, &["branch", name])?;
        Ok(())
    }

    pub fn current_branch(&self) -> Result<String> {
        run_git(&self.path, &["rev-parse", "--abbrev-ref", "HEAD"])
    }
}

/// Runner that records every command instead of spawning git.
pub struct RecordingRunner {
    listing: String,
    failing: Option<Vec<String>>,
    calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
}

impl RecordingRunner {
    /// `listing` is what `git branch -a` reports.
    pub fn new(listing: &str) -> Self {
        Self {
            listing: listing.to_string(),
            failing: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Makes the command with exactly these arguments exit with status 1.
    pub fn failing_on(mut self, args: &[&str]) -> Self {
        self.failing = Some(args.iter().map(|a| a.to_string()).collect());
        self
    }

    /// Every recorded command as a space-joined string.
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(_, args)| args.join(" "))
            .collect()
    }

    pub fn dirs(&self) -> Vec<PathBuf> {
        self.calls.borrow().iter().map(|(dir, _)| dir.clone()).collect()
    }

    fn record(&self, dir: &Path, args: &[&str]) -> Vec<String> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.calls
            .borrow_mut()
            .push((dir.to_path_buf(), args.clone()));
        args
    }
}

impl Runner for RecordingRunner {
    fn run(&self, dir: &Path, args: &[&str]) -> RunStatus {
        let args = self.record(dir, args);
        if self.failing.as_ref() == Some(&args) {
            RunStatus::NonZeroExit(Some(1))
        } else {
            RunStatus::Success
        }
    }

    fn capture(&self, dir: &Path, args: &[&str]) -> anyhow::Result<String> {
        self.record(dir, args);
        Ok(self.listing.clone())
    }
}

/// Writes `contents` as `.gitmodules` in `dir` and parses it.
pub fn parse_in(dir: &Path, contents: &str) -> Result<SubmoduleMap> {
    std::fs::write(dir.join(".gitmodules"), contents)?;
    let parsed = gitmodules::collect_modules(dir, ".gitmodules")?
        .ok_or_else(|| anyhow::anyhow!(".gitmodules vanished"))?;
    Ok(parsed.modules)
}

//! Git submodule synchronizer library.
//!
//! This crate keeps the submodules listed in a `.gitmodules` file up to date:
//! - Parsing the `path`, `url`, `branch` and `shallow` keys of each section
//! - Pulling and initializing submodules in the top-level repository
//! - Detecting each submodule's primary branch
//! - Checking out and pulling, or force-resetting for shallow submodules

pub mod cli;
pub mod config;
pub mod constants;
pub mod git;
pub mod gitmodules;
pub mod output;
pub mod paths;
pub mod repo;
pub mod sync;

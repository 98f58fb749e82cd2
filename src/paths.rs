//! Resolution of submodule paths against the invoking directory.

use anyhow::Context;
use std::path::{Component, Path, PathBuf};

/// Joins `value` onto `cwd` unless it is already absolute, then drops `.`
/// components and folds `..` lexically.
#[must_use]
pub fn make_absolute(cwd: &Path, value: &str) -> PathBuf {
    let joined = Path::new(value);
    let joined = if joined.is_absolute() {
        joined.to_path_buf()
    } else {
        cwd.join(joined)
    };
    normalize(&joined)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Resolves a `path=` value to an existing directory, or `None`.
#[must_use]
pub fn resolve_directory(cwd: &Path, value: &str) -> Option<PathBuf> {
    let path = make_absolute(cwd, value);
    path.is_dir().then_some(path)
}

/// Confirms that `path` can be used as the working directory of a command
/// and returns its canonical form.
pub fn enter_directory(path: &Path) -> anyhow::Result<PathBuf> {
    let canonical = std::fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    if !canonical.is_dir() {
        anyhow::bail!("{} is not a directory", canonical.display());
    }
    Ok(canonical)
}

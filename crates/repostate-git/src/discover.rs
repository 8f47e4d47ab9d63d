//! Working-copy discovery.
//!
//! Resolves whether a path is inside a working copy, and if so where its
//! root is. Asking git (`rev-parse --show-toplevel`) rather than walking
//! the filesystem keeps worktrees and submodules correct.

use std::path::{Path, PathBuf};

use repostate_core::Result;

use crate::run::{Reach, run};

/// Root directory of the working copy containing `path`.
///
/// Errors when `path` is not inside a working copy (or git cannot be run
/// there at all).
pub fn repository_root(path: &Path) -> Result<PathBuf> {
    let out = run(Some(path), &["rev-parse", "--show-toplevel"], Reach::Local)?.into_stdout()?;
    Ok(PathBuf::from(out.strip_suffix('\n').unwrap_or(&out)))
}

/// Whether `path` is inside a working copy.
pub fn is_repository(path: &Path) -> bool {
    repository_root(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tempdir_is_not_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        assert!(repository_root(dir.path()).is_err());
        assert!(!is_repository(dir.path()));
    }
}

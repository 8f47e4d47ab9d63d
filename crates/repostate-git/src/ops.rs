//! Version-independent working-copy operations.
//!
//! The commands here behave the same on every git version the backend
//! supports, so both strategies share them.

use std::path::Path;

use repostate_core::{DEFAULT_REMOTE, REVISION_LEN, Result, VcsError};

use crate::parse;
use crate::run::{Reach, run};

/// Porcelain status of the working tree; empty when clean.
pub(crate) fn status(dir: &Path) -> Result<String> {
    run(Some(dir), &["status", "--porcelain"], Reach::Local)?.into_stdout()
}

/// Name of the currently checked out branch.
pub(crate) fn branch(dir: &Path) -> Result<String> {
    let out = run(
        Some(dir),
        &["rev-parse", "--abbrev-ref", "HEAD"],
        Reach::Local,
    )?
    .into_stdout()?;
    // rev-parse output is porcelain; only the single trailing newline is
    // removed.
    Ok(out.strip_suffix('\n').unwrap_or(&out).to_string())
}

/// Full revision hash of `default_branch`.
///
/// A well-formed revision is exactly [`REVISION_LEN`] characters; shorter
/// output is malformed, never padded.
pub(crate) fn local_revision(dir: &Path, default_branch: &str) -> Result<String> {
    let out = run(Some(dir), &["rev-parse", default_branch], Reach::Local)?.into_stdout()?;
    match out.get(..REVISION_LEN) {
        Some(revision) => Ok(revision.to_string()),
        None => Err(VcsError::malformed(format!(
            "revision output is {} bytes, expected at least {REVISION_LEN}",
            out.len()
        ))),
    }
}

/// Stash listing; empty when nothing is stashed.
pub(crate) fn stash(dir: &Path) -> Result<String> {
    run(Some(dir), &["stash", "list"], Reach::Local)?.into_stdout()
}

/// Default branch advertised by the "origin" remote, scraped from the
/// remote summary.
///
/// Works against servers that do not advertise a HEAD symref, at the cost
/// of an extra network round trip.
pub(crate) fn origin_head_branch(dir: &Path) -> Result<String> {
    let out = run(
        Some(dir),
        &["remote", "show", DEFAULT_REMOTE],
        Reach::Remote,
    )?
    .into_stdout()?;
    parse::head_branch(&out)
        .map(str::to_string)
        .ok_or_else(|| VcsError::malformed("no HEAD branch in remote summary"))
}

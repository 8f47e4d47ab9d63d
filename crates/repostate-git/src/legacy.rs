//! Strategy for old git binaries.
//!
//! Binaries older than 2.8 lack `remote get-url`, `for-each-ref
//! --contains`, and `ls-remote --symref`, so every operation that has a
//! richer porcelain on newer binaries goes through an older command and a
//! scraping parser here instead.

use std::path::Path;

use repostate_core::{DEFAULT_REMOTE, RemoteHead, RemoteVcs, Result, Vcs, VcsError};

use crate::ops;
use crate::parse;
use crate::run::{Reach, StderrKind, is_no_such_commit, run, stderr_kind};

/// [`Vcs`] implementation for git binaries older than 2.8.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyGit;

impl Vcs for LegacyGit {
    fn status(&self, dir: &Path) -> Result<String> {
        ops::status(dir)
    }

    fn branch(&self, dir: &Path) -> Result<String> {
        ops::branch(dir)
    }

    fn local_revision(&self, dir: &Path, default_branch: &str) -> Result<String> {
        ops::local_revision(dir, default_branch)
    }

    fn stash(&self, dir: &Path) -> Result<String> {
        ops::stash(dir)
    }

    fn contains(&self, dir: &Path, revision: &str, default_branch: &str) -> Result<bool> {
        let exec = run(
            Some(dir),
            &["branch", "--contains", revision, default_branch],
            Reach::Local,
        )?;
        if exec.success() {
            // Contained iff the output is exactly the branch entry, starred
            // when it is the current branch.
            let current = format!("* {default_branch}\n");
            let other = format!("  {default_branch}\n");
            return Ok(exec.stdout == current || exec.stdout == other);
        }
        if is_no_such_commit(&exec.stderr, revision) {
            return Ok(false);
        }
        Err(exec.failure())
    }

    fn remote_contains(&self, dir: &Path, revision: &str, default_branch: &str) -> Result<bool> {
        let tracking = format!("{DEFAULT_REMOTE}/{default_branch}");
        let exec = run(
            Some(dir),
            &["branch", "-r", "--contains", revision, &tracking],
            Reach::Local,
        )?;
        if exec.success() {
            return Ok(exec.stdout == format!("  {tracking}\n"));
        }
        if is_no_such_commit(&exec.stderr, revision) {
            return Ok(false);
        }
        Err(exec.failure())
    }

    fn remote_url(&self, dir: &Path) -> Result<String> {
        // `remote get-url` does not exist here; list all remotes and pick
        // the origin fetch line.
        let out = run(Some(dir), &["remote", "-v"], Reach::Local)?.into_stdout()?;
        parse::fetch_url(&out).ok_or(VcsError::NoRemote)
    }

    fn remote_branch_and_revision(&self, dir: &Path) -> Result<RemoteHead> {
        let exec = run(
            Some(dir),
            &["ls-remote", DEFAULT_REMOTE, "HEAD", "refs/heads/*"],
            Reach::Remote,
        )?;
        if !exec.success() {
            return Err(match stderr_kind(&exec.stderr) {
                StderrKind::OriginNotARepository => VcsError::NoRemote,
                _ => exec.failure(),
            });
        }
        // The listing pins down the revision; without --symref the branch
        // can only be read reliably from the remote summary.
        let head = parse::ls_remote(&exec.stdout)?;
        let branch = ops::origin_head_branch(dir)?;
        Ok(RemoteHead {
            branch,
            revision: head.revision,
        })
    }

    fn cached_remote_default_branch(&self) -> Result<String> {
        Err(VcsError::Unsupported {
            operation: "cached remote default branch",
        })
    }

    fn no_remote_default_branch(&self) -> &'static str {
        "master"
    }
}

/// [`RemoteVcs`] implementation for git binaries older than 2.8.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyGitRemote;

impl RemoteVcs for LegacyGitRemote {
    fn remote_branch_and_revision(&self, remote_url: &str) -> Result<RemoteHead> {
        let out = run(
            None,
            &["ls-remote", remote_url, "HEAD", "refs/heads/*"],
            Reach::Remote,
        )?
        .into_stdout()?;
        parse::ls_remote(&out)
    }
}

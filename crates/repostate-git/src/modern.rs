//! Strategy for git 2.8 and newer.
//!
//! Newer binaries expose porcelain that removes most of the legacy
//! strategy's scraping: `remote get-url` for the remote URL, `for-each-ref
//! --contains` with a constant format marker for containment, and
//! `ls-remote --symref` for the remote default branch. The symref still has
//! a scraping fallback because some git servers do not advertise it.

use std::path::Path;

use repostate_core::{DEFAULT_REMOTE, RemoteHead, RemoteVcs, Result, Vcs, VcsError};
use tracing::debug;

use crate::ops;
use crate::parse::{self, SymrefHead};
use crate::run::{Reach, StderrKind, is_no_such_commit, run, stderr_kind};

/// [`Vcs`] implementation for git 2.8 and newer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModernGit;

impl ModernGit {
    fn ref_contains(&self, dir: &Path, revision: &str, reference: &str) -> Result<bool> {
        // --format=contains is an arbitrary constant marker looked for in
        // the output.
        let exec = run(
            Some(dir),
            &[
                "for-each-ref",
                "--format=contains",
                "--count=1",
                "--contains",
                revision,
                reference,
            ],
            Reach::Local,
        )?;
        if exec.success() {
            return Ok(exec.stdout == "contains\n");
        }
        if is_no_such_commit(&exec.stderr, revision) {
            return Ok(false);
        }
        Err(exec.failure())
    }
}

impl Vcs for ModernGit {
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
        self.ref_contains(dir, revision, &format!("refs/heads/{default_branch}"))
    }

    fn remote_contains(&self, dir: &Path, revision: &str, default_branch: &str) -> Result<bool> {
        self.ref_contains(
            dir,
            revision,
            &format!("refs/remotes/{DEFAULT_REMOTE}/{default_branch}"),
        )
    }

    fn remote_url(&self, dir: &Path) -> Result<String> {
        let exec = run(
            Some(dir),
            &["remote", "get-url", DEFAULT_REMOTE],
            Reach::Local,
        )?;
        if exec.success() {
            let url = exec.stdout;
            return Ok(url.strip_suffix('\n').unwrap_or(&url).to_string());
        }
        match stderr_kind(&exec.stderr) {
            StderrKind::NoSuchRemoteOrigin => Err(VcsError::NoRemote),
            _ => Err(exec.failure()),
        }
    }

    fn remote_branch_and_revision(&self, dir: &Path) -> Result<RemoteHead> {
        let exec = run(
            Some(dir),
            &["ls-remote", "--symref", DEFAULT_REMOTE, "HEAD", "refs/heads/*"],
            Reach::Remote,
        )?;
        if !exec.success() {
            return Err(match stderr_kind(&exec.stderr) {
                StderrKind::OriginNotARepository => VcsError::NoRemote,
                StderrKind::RepositoryNotFound => VcsError::not_found(exec.stderr.trim_end()),
                _ => exec.failure(),
            });
        }
        match parse::ls_remote_symref(&exec.stdout)? {
            SymrefHead::Complete(head) => Ok(head),
            SymrefHead::RevisionOnly(revision) => {
                // The server ignored --symref; scrape the remote summary
                // instead.
                debug!("ls-remote did not advertise HEAD symref, falling back to remote summary");
                let branch = ops::origin_head_branch(dir)?;
                Ok(RemoteHead { branch, revision })
            }
        }
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

/// [`RemoteVcs`] implementation for git 2.8 and newer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModernGitRemote;

impl RemoteVcs for ModernGitRemote {
    fn remote_branch_and_revision(&self, remote_url: &str) -> Result<RemoteHead> {
        let exec = run(
            None,
            &["ls-remote", "--symref", remote_url, "HEAD", "refs/heads/*"],
            Reach::Remote,
        )?;
        if !exec.success() {
            return Err(match stderr_kind(&exec.stderr) {
                StderrKind::RepositoryNotFound => VcsError::not_found(exec.stderr.trim_end()),
                _ => exec.failure(),
            });
        }
        match parse::ls_remote_symref(&exec.stdout)? {
            SymrefHead::Complete(head) => Ok(head),
            SymrefHead::RevisionOnly(revision) => {
                // No clone to run `remote show` against; guess from the
                // listing itself.
                debug!("ls-remote did not advertise HEAD symref, guessing branch from listing");
                let branch = parse::guess_branch(&exec.stdout, &revision)?;
                Ok(RemoteHead { branch, revision })
            }
        }
    }
}

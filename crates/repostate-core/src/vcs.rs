//! Capability traits implemented by version-control backends.

use std::path::Path;

use crate::error::Result;
use crate::remote::RemoteHead;

/// Operations against a local working copy.
///
/// `dir` arguments must point inside a working copy; discovering the root
/// from an arbitrary path is a backend concern (see `repostate-git`'s
/// `discover` module). Calls are synchronous and spawn one subprocess each;
/// the trait does nothing to serialize concurrent calls on the same
/// directory, and remote-reaching operations carry no deadline beyond the
/// transport's own blocking behavior.
pub trait Vcs: Send + Sync {
    /// Returns the changed-file lines of the working tree, one per line in
    /// porcelain format. An empty string means the tree is clean.
    fn status(&self, dir: &Path) -> Result<String>;

    /// Returns the name of the currently checked out branch.
    fn branch(&self, dir: &Path) -> Result<String>;

    /// Resolves `default_branch` to its full revision hash.
    ///
    /// The result is always exactly [`REVISION_LEN`](crate::REVISION_LEN)
    /// hex characters; shorter output is reported as
    /// [`MalformedOutput`](crate::VcsError::MalformedOutput), never
    /// truncated or padded.
    fn local_revision(&self, dir: &Path, default_branch: &str) -> Result<String>;

    /// Returns the stash listing. An empty string means nothing is stashed.
    fn stash(&self, dir: &Path) -> Result<String>;

    /// Reports whether `revision` is an ancestor of the local
    /// `default_branch`.
    ///
    /// A revision unknown to the repository yields `Ok(false)`, not an
    /// error.
    fn contains(&self, dir: &Path, revision: &str, default_branch: &str) -> Result<bool>;

    /// Reports whether `revision` is an ancestor of the remote-tracking
    /// `origin/<default_branch>`.
    ///
    /// Like [`contains`](Vcs::contains), an unknown revision yields
    /// `Ok(false)`.
    fn remote_contains(&self, dir: &Path, revision: &str, default_branch: &str) -> Result<bool>;

    /// Returns the fetch URL of the "origin" remote.
    ///
    /// Yields [`NoRemote`](crate::VcsError::NoRemote) when "origin" is not
    /// configured, even if other remotes exist.
    fn remote_url(&self, dir: &Path) -> Result<String>;

    /// Queries the "origin" remote for its default branch and the revision
    /// that branch points at. Reaches the network.
    fn remote_branch_and_revision(&self, dir: &Path) -> Result<RemoteHead>;

    /// Best-effort default branch of the remote without reaching the
    /// network.
    ///
    /// Backends without a reliable local cache return
    /// [`Unsupported`](crate::VcsError::Unsupported); callers should then
    /// fall back to [`no_remote_default_branch`](Vcs::no_remote_default_branch).
    fn cached_remote_default_branch(&self) -> Result<String>;

    /// The branch name to assume when no remote is configured at all.
    fn no_remote_default_branch(&self) -> &'static str;
}

/// Operations against a remote repository URL, with no local clone.
pub trait RemoteVcs: Send + Sync {
    /// Queries `remote_url` for its default branch and the revision that
    /// branch points at. Reaches the network.
    fn remote_branch_and_revision(&self, remote_url: &str) -> Result<RemoteHead>;
}

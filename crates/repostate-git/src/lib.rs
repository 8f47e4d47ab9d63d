//! Git backend for repository state queries.
//!
//! State is read by spawning the installed `git` binary and parsing its
//! output. Because the output format of several porcelain commands differs
//! across git versions, [`detect`] probes `git --version` once per process
//! and selects between two command strategies: [`ModernGit`] for 2.8 and
//! newer (`ls-remote --symref`, `for-each-ref --contains`, `remote
//! get-url`) and [`LegacyGit`] for older binaries (`remote -v` parsing,
//! `branch --contains` output matching, remote-summary scraping). The
//! modern strategy still degrades to the legacy scraping at call time when
//! a git *server* does not support `--symref`.

pub mod discover;
mod legacy;
mod modern;
mod ops;
mod parse;
mod run;
mod version;

pub use legacy::{LegacyGit, LegacyGitRemote};
pub use modern::{ModernGit, ModernGitRemote};
pub use version::GitVersion;

use repostate_core::{RemoteVcs, Result, Vcs};
use tracing::debug;

/// Selects the [`Vcs`] implementation matching the installed git binary.
///
/// The version probe runs once per process; the returned strategy is
/// immutable. Errors if the binary cannot be spawned or its version string
/// is unrecognizable.
pub fn detect() -> Result<Box<dyn Vcs>> {
    let version = version::binary_version()?;
    if version.supports_symref_ls_remote() {
        debug!(%version, strategy = "modern", "selected git strategy");
        Ok(Box::new(ModernGit))
    } else {
        debug!(%version, strategy = "legacy", "selected git strategy");
        Ok(Box::new(LegacyGit))
    }
}

/// Selects the [`RemoteVcs`] implementation matching the installed git
/// binary.
pub fn detect_remote() -> Result<Box<dyn RemoteVcs>> {
    let version = version::binary_version()?;
    if version.supports_symref_ls_remote() {
        debug!(%version, strategy = "modern", "selected remote git strategy");
        Ok(Box::new(ModernGitRemote))
    } else {
        debug!(%version, strategy = "legacy", "selected remote git strategy");
        Ok(Box::new(LegacyGitRemote))
    }
}

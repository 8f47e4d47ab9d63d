//! Git binary version detection.
//!
//! The output format of several porcelain commands is not stable across git
//! versions, so the backend picks its command set from the version the
//! installed binary reports.

use std::fmt;
use std::sync::OnceLock;

use repostate_core::{Result, VcsError};

use crate::run::{Reach, run};

/// A git binary version, `major.minor`. Patch levels never affect strategy
/// selection and are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GitVersion {
    pub major: u32,
    pub minor: u32,
}

impl GitVersion {
    /// First version whose `ls-remote` understands `--symref` and whose
    /// `for-each-ref` understands `--contains`.
    pub const MODERN: GitVersion = GitVersion { major: 2, minor: 8 };

    /// Parses the output of `git --version`, e.g. `git version 2.39.2` or
    /// `git version 2.39.3 (Apple Git-146)`.
    pub fn parse(text: &str) -> Result<GitVersion> {
        let rest = text
            .trim()
            .strip_prefix("git version ")
            .ok_or_else(|| unrecognized(text))?;
        let mut fields = rest.split('.');
        let major = fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| unrecognized(text))?;
        let minor = fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| unrecognized(text))?;
        Ok(GitVersion { major, minor })
    }

    /// Whether this binary speaks the richer porcelain the modern strategy
    /// relies on.
    pub fn supports_symref_ls_remote(self) -> bool {
        self >= Self::MODERN
    }
}

impl fmt::Display for GitVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

fn unrecognized(text: &str) -> VcsError {
    VcsError::malformed(format!("unrecognized version string {text:?}"))
}

/// Version of the installed git binary, probed once per process and reused
/// immutably thereafter. Probe failures are not cached, so a missing binary
/// is reported on every attempt.
pub(crate) fn binary_version() -> Result<GitVersion> {
    static VERSION: OnceLock<GitVersion> = OnceLock::new();
    if let Some(version) = VERSION.get() {
        return Ok(*version);
    }
    let out = run(None, &["--version"], Reach::Local)?.into_stdout()?;
    let version = GitVersion::parse(&out)?;
    Ok(*VERSION.get_or_init(|| version))
}

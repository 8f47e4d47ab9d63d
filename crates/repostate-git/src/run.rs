//! Subprocess execution with a controlled environment.
//!
//! Every git invocation goes through [`run`], which forces the locale so
//! parsers see untranslated output and, for remote-reaching commands, keeps
//! git strictly non-interactive. stdout and stderr are captured separately
//! so callers can pattern-match stderr before deciding whether a non-zero
//! exit is an error.

use std::path::Path;
use std::process::{Command, ExitStatus};

use repostate_core::{Result, VcsError};
use tracing::trace;

/// Locale forced on every invocation.
const FORCED_LANG: &str = "en_US.UTF-8";

/// Whether an invocation may reach the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reach {
    Local,
    Remote,
}

/// Captured result of one git invocation.
pub(crate) struct Exec {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Exec {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Consumes the capture, returning stdout on success and the generic
    /// failure otherwise.
    pub fn into_stdout(self) -> Result<String> {
        if self.status.success() {
            Ok(self.stdout)
        } else {
            Err(self.failure())
        }
    }

    /// The generic failure for this capture: the exit code with stderr
    /// appended verbatim for diagnostics.
    pub fn failure(&self) -> VcsError {
        VcsError::CommandFailed {
            code: self.status.code(),
            stderr: self.stderr.trim_end().to_string(),
        }
    }
}

/// Runs `git <args>`, in `dir` when given, and captures the result.
///
/// One attempt, no retries, no deadline beyond the process's own blocking
/// behavior. A non-zero exit is not an error at this layer; several callers
/// classify stderr before deciding.
pub(crate) fn run(dir: Option<&Path>, args: &[&str], reach: Reach) -> Result<Exec> {
    let mut cmd = Command::new("git");
    cmd.args(args);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    cmd.env("LANG", FORCED_LANG);
    if reach == Reach::Remote {
        // `true` is the /bin/true command: git believes it already asked
        // for a password and returns a failure exit code instead of
        // prompting.
        cmd.env("GIT_ASKPASS", "true");
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        // StrictHostKeyChecking defaults to "ask"; fail instead of
        // blocking on user input.
        cmd.env("GIT_SSH_COMMAND", "ssh -o StrictHostKeyChecking=yes");
    }

    trace!(?args, ?dir, "spawning git");

    let output = cmd.output()?;
    Ok(Exec {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

// ---------------------------------------------------------------------------
// Stderr classification
// ---------------------------------------------------------------------------

/// The stderr messages git emits for failure modes callers handle
/// specially, gathered here so call sites match on a kind instead of
/// comparing strings ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StderrKind {
    /// `fatal: 'origin' does not appear to be a git repository` — the
    /// working copy has no "origin" remote.
    OriginNotARepository,
    /// `fatal: No such remote 'origin'` — from `remote get-url`.
    NoSuchRemoteOrigin,
    /// `remote: Repository not found.` — the server says the repository
    /// does not exist.
    RepositoryNotFound,
    /// Anything else.
    Other,
}

pub(crate) fn stderr_kind(stderr: &str) -> StderrKind {
    if stderr.starts_with("fatal: 'origin' does not appear to be a git repository\n") {
        StderrKind::OriginNotARepository
    } else if stderr == "fatal: No such remote 'origin'\n" {
        StderrKind::NoSuchRemoteOrigin
    } else if stderr.starts_with("remote: Repository not found.\n") {
        StderrKind::RepositoryNotFound
    } else {
        StderrKind::Other
    }
}

/// Matches the `error: no such commit <revision>` message that containment
/// queries emit for a revision the repository does not have.
pub(crate) fn is_no_such_commit(stderr: &str, revision: &str) -> bool {
    stderr
        .strip_prefix("error: no such commit ")
        .and_then(|rest| rest.strip_prefix(revision))
        .is_some_and(|rest| rest.starts_with('\n'))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

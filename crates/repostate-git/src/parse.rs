//! Parsers for git's textual output.
//!
//! Pure functions over captured stdout, kept free of subprocess code so the
//! line-scanning heuristics can be tested without spawning git. Fields are
//! tab-separated where git emits them that way (`remote -v`, `ls-remote`).

use repostate_core::{DEFAULT_REMOTE, RemoteHead, Result, VcsError};

/// Fetch URL of the "origin" remote from `git remote -v` output, whose
/// lines look like `origin<TAB>https://example.com/repo (fetch)`.
///
/// Returns `None` when no origin fetch line is present, including for empty
/// output (no remotes at all).
pub(crate) fn fetch_url(out: &str) -> Option<String> {
    for line in out.lines() {
        let Some((name, rest)) = line.split_once('\t') else {
            continue;
        };
        if name != DEFAULT_REMOTE {
            continue;
        }
        if let Some(url) = rest.strip_suffix(" (fetch)") {
            return Some(url.to_string());
        }
    }
    None
}

/// Default branch and revision from `ls-remote HEAD refs/heads/*` output
/// without `--symref`. The `HEAD` line is assumed to come before the branch
/// references.
///
/// When several branches point at HEAD's revision the true default cannot
/// be determined from this listing. A branch literally named "master" wins
/// over any other candidate; otherwise whichever candidate is scanned last
/// is kept. Best-effort, not a contract.
pub(crate) fn ls_remote(out: &str) -> Result<RemoteHead> {
    if out.is_empty() {
        return Err(VcsError::malformed("empty ls-remote output"));
    }
    let mut branch = String::new();
    let mut revision = String::new();
    for line in out.lines() {
        let Some((rev, reference)) = line.split_once('\t') else {
            continue;
        };
        if reference == "HEAD" {
            revision = rev.to_string();
            continue;
        }
        if rev == revision && branch != "master" {
            if let Some(name) = reference.strip_prefix("refs/heads/") {
                branch = name.to_string();
            }
        }
    }
    if branch.is_empty() || revision.is_empty() {
        return Err(VcsError::malformed(
            "HEAD branch or revision not found in ls-remote output",
        ));
    }
    Ok(RemoteHead { branch, revision })
}

/// Result of parsing `ls-remote --symref` output.
pub(crate) enum SymrefHead {
    /// Both the HEAD symref and its revision were found.
    Complete(RemoteHead),
    /// Only the revision was found. Some git servers ignore `--symref`, so
    /// the branch has to be determined some other way.
    RevisionOnly(String),
}

/// Default branch and revision from `ls-remote --symref HEAD refs/heads/*`
/// output. The branch comes from a `ref: refs/heads/<name><TAB>HEAD` line,
/// the revision from the plain `<revision><TAB>HEAD` line.
pub(crate) fn ls_remote_symref(out: &str) -> Result<SymrefHead> {
    if out.is_empty() {
        return Err(VcsError::malformed("empty ls-remote output"));
    }
    let mut branch = String::new();
    let mut revision = String::new();
    for line in out.lines() {
        let Some((field, reference)) = line.split_once('\t') else {
            continue;
        };
        if reference != "HEAD" {
            continue;
        }
        if let Some(name) = field.strip_prefix("ref: refs/heads/") {
            branch = name.to_string();
        } else {
            revision = field.to_string();
        }
        if !branch.is_empty() && !revision.is_empty() {
            return Ok(SymrefHead::Complete(RemoteHead { branch, revision }));
        }
    }
    if revision.is_empty() {
        Err(VcsError::malformed(
            "HEAD branch or revision not found in ls-remote output",
        ))
    } else {
        Ok(SymrefHead::RevisionOnly(revision))
    }
}

/// Best-effort default branch for servers that ignored `--symref`: any
/// branch reference pointing at `revision`, with the same master-first
/// tie-break as [`ls_remote`].
pub(crate) fn guess_branch(out: &str, revision: &str) -> Result<String> {
    if out.is_empty() {
        return Err(VcsError::malformed("empty ls-remote output"));
    }
    let mut branch = String::new();
    for line in out.lines() {
        let Some((rev, reference)) = line.split_once('\t') else {
            continue;
        };
        if rev != revision || reference == "HEAD" {
            continue;
        }
        if branch != "master" {
            if let Some(name) = reference.strip_prefix("refs/heads/") {
                branch = name.to_string();
            }
        }
    }
    if branch.is_empty() {
        return Err(VcsError::malformed(
            "HEAD branch not found in ls-remote output",
        ));
    }
    Ok(branch)
}

/// Default branch scraped from `remote show` output, which contains a line
/// reading `  HEAD branch: <name>`.
pub(crate) fn head_branch(out: &str) -> Option<&str> {
    const MARKER: &str = "\n  HEAD branch: ";
    let start = out.find(MARKER)? + MARKER.len();
    let rest = &out[start..];
    Some(match rest.find('\n') {
        Some(end) => &rest[..end],
        None => rest,
    })
}

//! Integration tests exercising both strategies against throwaway
//! repositories.
//!
//! Each test builds its own repository under a temp directory with the real
//! `git` binary. Remote-reaching operations are pointed at a second, bare
//! repository on the local filesystem, so nothing here touches the network.
//! The installed binary is new enough to run both command sets, which lets
//! the legacy strategy be tested alongside the modern one.

use std::fs;
use std::path::Path;
use std::process::Command;

use repostate_core::{RemoteVcs, Vcs, VcsError, is_revision};
use repostate_git::{LegacyGit, LegacyGitRemote, ModernGit, ModernGitRemote, detect, discover};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Runs `git <args>` in `dir`, panicking on failure.
fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Initializes a repository on branch `master` with one commit.
fn init_repo() -> TempDir {
    let tmp = TempDir::new().unwrap();
    git(tmp.path(), &["init", "--initial-branch=master"]);
    git(tmp.path(), &["config", "user.name", "Test"]);
    git(tmp.path(), &["config", "user.email", "test@example.com"]);
    git(tmp.path(), &["config", "commit.gpgsign", "false"]);
    fs::write(tmp.path().join("README.md"), "# test\n").unwrap();
    git(tmp.path(), &["add", "."]);
    git(tmp.path(), &["commit", "-m", "initial commit"]);
    tmp
}

/// Creates a bare repository, wires it up as the "origin" remote of
/// `repo`, and pushes master. Returns the bare repository so it outlives
/// the test body.
fn add_origin(repo: &Path) -> TempDir {
    let remote = TempDir::new().unwrap();
    git(remote.path(), &["init", "--bare", "--initial-branch=master"]);
    let url = remote.path().to_str().unwrap().to_string();
    git(repo, &["remote", "add", "origin", &url]);
    git(repo, &["push", "origin", "master"]);
    git(repo, &["fetch", "origin"]);
    remote
}

/// Commits a file change in `repo`.
fn commit_file(repo: &Path, name: &str, contents: &str, message: &str) {
    fs::write(repo.join(name), contents).unwrap();
    git(repo, &["add", "."]);
    git(repo, &["commit", "-m", message]);
}

/// Both strategies under test.
fn strategies() -> Vec<Box<dyn Vcs>> {
    vec![Box::new(LegacyGit), Box::new(ModernGit)]
}

/// A well-formed revision no repository in these tests contains.
const MISSING_REV: &str = "0123456789abcdef0123456789abcdef01234567";

// ---------------------------------------------------------------------------
// Strategy selection
// ---------------------------------------------------------------------------

#[test]
fn detect_selects_a_strategy() {
    let vcs = detect().expect("git should be installed");
    assert_eq!(vcs.no_remote_default_branch(), "master");
}

// ---------------------------------------------------------------------------
// Local operations
// ---------------------------------------------------------------------------

#[test]
fn status_reports_dirty_and_clean_trees() {
    let repo = init_repo();
    for vcs in strategies() {
        assert_eq!(vcs.status(repo.path()).unwrap(), "");
    }
    fs::write(repo.path().join("README.md"), "# changed\n").unwrap();
    for vcs in strategies() {
        let dirty = vcs.status(repo.path()).unwrap();
        assert!(dirty.contains("README.md"), "dirty status: {dirty:?}");
    }
}

#[test]
fn branch_follows_checkout() {
    let repo = init_repo();
    for vcs in strategies() {
        assert_eq!(vcs.branch(repo.path()).unwrap(), "master");
    }
    git(repo.path(), &["checkout", "-b", "feature"]);
    for vcs in strategies() {
        assert_eq!(vcs.branch(repo.path()).unwrap(), "feature");
    }
}

#[test]
fn local_revision_is_a_full_hash() {
    let repo = init_repo();
    for vcs in strategies() {
        let rev = vcs.local_revision(repo.path(), "master").unwrap();
        assert!(is_revision(&rev), "not a revision: {rev:?}");
    }
}

#[test]
fn local_revision_of_unknown_branch_fails() {
    let repo = init_repo();
    for vcs in strategies() {
        let err = vcs
            .local_revision(repo.path(), "no-such-branch")
            .unwrap_err();
        assert!(matches!(err, VcsError::CommandFailed { .. }), "got {err:?}");
    }
}

#[test]
fn stash_lists_stashed_changes() {
    let repo = init_repo();
    for vcs in strategies() {
        assert_eq!(vcs.stash(repo.path()).unwrap(), "");
    }
    fs::write(repo.path().join("README.md"), "# stash me\n").unwrap();
    git(repo.path(), &["stash", "push", "-m", "wip"]);
    for vcs in strategies() {
        let stash = vcs.stash(repo.path()).unwrap();
        assert!(stash.contains("wip"), "stash listing: {stash:?}");
    }
}

// ---------------------------------------------------------------------------
// Containment
// ---------------------------------------------------------------------------

#[test]
fn contains_accepts_reachable_revision() {
    let repo = init_repo();
    for vcs in strategies() {
        let rev = vcs.local_revision(repo.path(), "master").unwrap();
        assert!(vcs.contains(repo.path(), &rev, "master").unwrap());
    }
}

#[test]
fn contains_rejects_unreachable_revision() {
    let repo = init_repo();
    git(repo.path(), &["checkout", "-b", "feature"]);
    commit_file(repo.path(), "feature.txt", "x\n", "feature work");
    for vcs in strategies() {
        let feature_rev = vcs.local_revision(repo.path(), "feature").unwrap();
        assert!(!vcs.contains(repo.path(), &feature_rev, "master").unwrap());
    }
}

#[test]
fn contains_treats_unknown_commit_as_false() {
    let repo = init_repo();
    for vcs in strategies() {
        assert!(!vcs.contains(repo.path(), MISSING_REV, "master").unwrap());
    }
}

#[test]
fn remote_contains_tracks_pushed_revisions() {
    let repo = init_repo();
    let _remote = add_origin(repo.path());
    for vcs in strategies() {
        let rev = vcs.local_revision(repo.path(), "master").unwrap();
        assert!(vcs.remote_contains(repo.path(), &rev, "master").unwrap());
    }
    // A new local-only commit is not on origin/master yet.
    commit_file(repo.path(), "local.txt", "x\n", "local only");
    for vcs in strategies() {
        let rev = vcs.local_revision(repo.path(), "master").unwrap();
        assert!(!vcs.remote_contains(repo.path(), &rev, "master").unwrap());
    }
}

#[test]
fn remote_contains_treats_unknown_commit_as_false() {
    let repo = init_repo();
    let _remote = add_origin(repo.path());
    for vcs in strategies() {
        assert!(
            !vcs.remote_contains(repo.path(), MISSING_REV, "master")
                .unwrap()
        );
    }
}

// ---------------------------------------------------------------------------
// Remote queries
// ---------------------------------------------------------------------------

#[test]
fn remote_url_returns_the_origin_fetch_url() {
    let repo = init_repo();
    let remote = add_origin(repo.path());
    let expected = remote.path().to_str().unwrap();
    for vcs in strategies() {
        assert_eq!(vcs.remote_url(repo.path()).unwrap(), expected);
    }
}

#[test]
fn remote_url_without_origin_is_no_remote() {
    let repo = init_repo();
    for vcs in strategies() {
        let err = vcs.remote_url(repo.path()).unwrap_err();
        assert!(err.is_no_remote(), "got {err:?}");
    }
}

#[test]
fn remote_url_ignores_non_origin_remotes() {
    let repo = init_repo();
    let other = TempDir::new().unwrap();
    git(other.path(), &["init", "--bare", "--initial-branch=master"]);
    git(
        repo.path(),
        &["remote", "add", "upstream", other.path().to_str().unwrap()],
    );
    for vcs in strategies() {
        let err = vcs.remote_url(repo.path()).unwrap_err();
        assert!(err.is_no_remote(), "got {err:?}");
    }
}

#[test]
fn remote_head_matches_pushed_master() {
    let repo = init_repo();
    let _remote = add_origin(repo.path());
    for vcs in strategies() {
        let head = vcs.remote_branch_and_revision(repo.path()).unwrap();
        let rev = vcs.local_revision(repo.path(), "master").unwrap();
        assert_eq!(head.branch, "master");
        assert_eq!(head.revision, rev);
    }
}

#[test]
fn remote_head_without_origin_is_no_remote() {
    let repo = init_repo();
    for vcs in strategies() {
        let err = vcs.remote_branch_and_revision(repo.path()).unwrap_err();
        assert!(err.is_no_remote(), "got {err:?}");
    }
}

#[test]
fn remote_head_by_url() {
    let repo = init_repo();
    let remote = add_origin(repo.path());
    let url = remote.path().to_str().unwrap();
    let expected = ModernGit.local_revision(repo.path(), "master").unwrap();
    for remote_vcs in [&LegacyGitRemote as &dyn RemoteVcs, &ModernGitRemote] {
        let head = remote_vcs.remote_branch_and_revision(url).unwrap();
        assert_eq!(head.branch, "master");
        assert_eq!(head.revision, expected);
    }
}

#[test]
fn cached_remote_default_branch_is_unsupported() {
    for vcs in strategies() {
        let err = vcs.cached_remote_default_branch().unwrap_err();
        assert!(matches!(err, VcsError::Unsupported { .. }), "got {err:?}");
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[test]
fn discover_finds_the_repository_root() {
    let repo = init_repo();
    let nested = repo.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();
    let root = discover::repository_root(&nested).unwrap();
    assert_eq!(
        root.canonicalize().unwrap(),
        repo.path().canonicalize().unwrap()
    );
    assert!(discover::is_repository(&nested));
}

#[test]
fn discover_rejects_a_plain_directory() {
    let dir = TempDir::new().unwrap();
    assert!(discover::repository_root(dir.path()).is_err());
    assert!(!discover::is_repository(dir.path()));
}

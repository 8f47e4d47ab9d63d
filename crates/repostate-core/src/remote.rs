//! Remote repository descriptors.

use serde::{Deserialize, Serialize};

/// The remote name all remote-reaching queries are pinned to.
///
/// A working copy may have other remotes configured with different URLs, but
/// for consistent results only this one is ever consulted; its absence is
/// reported as [`VcsError::NoRemote`](crate::VcsError::NoRemote) even when
/// other remotes exist.
pub const DEFAULT_REMOTE: &str = "origin";

/// The default branch of a remote repository together with the revision it
/// points at.
///
/// The revision is taken from remote listings verbatim; unlike locally
/// resolved revisions it is not validated against
/// [`REVISION_LEN`](crate::REVISION_LEN).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteHead {
    /// Branch name the remote's HEAD points at.
    pub branch: String,
    /// Revision the branch resolves to.
    pub revision: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serde_roundtrip() {
        let head = RemoteHead {
            branch: "main".to_string(),
            revision: "7cafcd837844e784b526369c9bce262804aebc60".to_string(),
        };
        let json = serde_json::to_string(&head).unwrap();
        let back: RemoteHead = serde_json::from_str(&json).unwrap();
        assert_eq!(back, head);
    }
}

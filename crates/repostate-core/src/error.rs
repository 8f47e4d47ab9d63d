//! Error types for repository state queries.

use thiserror::Error;

/// Errors that can occur while querying repository state.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The working copy has no "origin" remote configured.
    #[error("no \"origin\" remote is configured")]
    NoRemote,

    /// The remote server reports that the repository does not exist.
    #[error("remote repository not found: {details}")]
    NotFound {
        /// stderr text from the failed command.
        details: String,
    },

    /// Command output was missing an expected marker or field.
    #[error("unexpected command output: {context}")]
    MalformedOutput {
        /// What was being parsed and what was missing from it.
        context: String,
    },

    /// The command exited with a non-zero status for any other reason.
    #[error("command failed (exit code {code:?}): {stderr}")]
    CommandFailed {
        /// The exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// The content of stderr.
        stderr: String,
    },

    /// The version-control binary could not be spawned at all.
    #[error("failed to execute version-control binary: {0}")]
    Spawn(#[from] std::io::Error),

    /// The operation is not implemented by this backend.
    #[error("{operation} is not supported by this backend")]
    Unsupported {
        /// Human-readable name of the unsupported operation.
        operation: &'static str,
    },
}

/// A specialized `Result` type for repository state operations.
pub type Result<T> = std::result::Result<T, VcsError>;

impl VcsError {
    // -- Constructors --------------------------------------------------------

    /// Creates a [`VcsError::MalformedOutput`] with the given context.
    pub fn malformed(context: impl Into<String>) -> Self {
        Self::MalformedOutput {
            context: context.into(),
        }
    }

    /// Creates a [`VcsError::NotFound`] carrying the server's stderr text.
    pub fn not_found(details: impl Into<String>) -> Self {
        Self::NotFound {
            details: details.into(),
        }
    }

    // -- Predicates ----------------------------------------------------------

    /// Returns `true` if this is a [`VcsError::NoRemote`].
    pub fn is_no_remote(&self) -> bool {
        matches!(self, Self::NoRemote)
    }

    /// Returns `true` if this is a [`VcsError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

//! Core types and traits for repository state queries.
//!
//! This crate defines the data model and the capability traits implemented by
//! version-control backends. It contains no subprocess code; backends such as
//! `repostate-git` implement [`Vcs`] and [`RemoteVcs`] on top of it.

pub mod error;
pub mod remote;
pub mod revision;
pub mod vcs;

pub use error::{Result, VcsError};
pub use remote::{DEFAULT_REMOTE, RemoteHead};
pub use revision::{REVISION_LEN, is_revision};
pub use vcs::{RemoteVcs, Vcs};

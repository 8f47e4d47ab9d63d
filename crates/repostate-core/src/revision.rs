//! Revision identifiers.

/// Length of a full revision hash in the legacy hash scheme.
pub const REVISION_LEN: usize = 40;

/// Returns `true` if `s` is a well-formed full revision hash: exactly
/// [`REVISION_LEN`] ASCII hex digits.
///
/// Backends enforce this for locally resolved revisions; revisions taken
/// from remote listings are passed through unvalidated.
pub fn is_revision(s: &str) -> bool {
    s.len() == REVISION_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

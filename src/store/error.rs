//! Error types for the session and cart store.

use thiserror::Error;

/// Errors surfaced synchronously by [`crate::store::SessionCartStore`].
///
/// Persistence failures are never represented here: they are absorbed inside
/// the store, since in-memory state is authoritative for the session's
/// lifetime.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced session does not exist.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// A session title was empty after trimming whitespace.
    #[error("session title must not be empty")]
    InvalidTitle,

    /// A cart quantity was not a positive integer.
    #[error("quantity must be a positive integer, got {0}")]
    InvalidQuantity(i64),

    /// A cart index was outside the current cart bounds.
    #[error("cart index {index} out of range for {len} line(s)")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Cart length at the time of the call.
        len: usize,
    },
}

impl StoreError {
    /// Whether the error refers to a missing session.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::SessionNotFound(_))
    }
}

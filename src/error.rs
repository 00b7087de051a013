//! Error types for leadmerge.
//!
//! All errors are strongly typed using thiserror. Absence of a record is
//! not an error: detail lookups return `Ok(None)` for unknown uids, and
//! unrecognized filter/sort inputs are silently defaulted rather than
//! rejected.

use thiserror::Error;

use crate::storage::StorageError;

/// Top-level error type for merge/query operations.
#[derive(Debug, Error)]
pub enum LeadError {
    /// The record store failed; surfaced to callers as a server-side
    /// failure, never retried internally.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Invariant breakage inside the engine.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable description.
        message: String,
    },
}

impl LeadError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a storage error.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Returns true if a caller-level retry could succeed.
    ///
    /// The read path is idempotent, so store unavailability is worth
    /// retrying from the caller; anything else is not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(StorageError::Unavailable(_)))
    }
}

/// Result type alias for merge/query operations.
pub type LeadResult<T> = Result<T, LeadError>;

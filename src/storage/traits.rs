//! Abstract storage trait for lead records.
//!
//! The engine only ever reads; seeding is owned by an external process.
//! Keeping the contract behind a trait enables an in-memory backend for
//! tests and embedded use alongside the SQLite backend.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::record::{DistinctField, LeadRecord, SourceTable};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Store unreachable or corrupt. Not retried internally; the read path
    /// is idempotent and caller-level retry is sufficient.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Seed-time uniqueness violation on a non-empty uid within one table.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Backend error.
    #[error("Storage backend error: {0}")]
    BackendError(String),
}

/// Read-only store of the two scraped record tables.
///
/// # Resource model
/// Implementations are `Send + Sync`; every call is a self-contained
/// read-only transaction that acquires whatever handle it needs and
/// releases it before returning.
pub trait RecordStore: Send + Sync {
    /// Exact uid lookup in one table. Absence is not an error.
    fn find_by_uid(
        &self,
        table: SourceTable,
        uid: &str,
    ) -> Result<Option<LeadRecord>, StorageError>;

    /// All rows of one table whose uid is non-null and non-empty; the input
    /// selection for the list merge.
    fn scan_identified(&self, table: SourceTable) -> Result<Vec<LeadRecord>, StorageError>;

    /// Distinct non-null non-empty values of a column across BOTH tables,
    /// used for filter-option discovery.
    fn list_distinct(&self, field: DistinctField) -> Result<BTreeSet<String>, StorageError>;

    /// Store reachability probe for health reporting.
    fn ping(&self) -> Result<(), StorageError>;
}

//! Storage backends for lead records.
//!
//! The [`RecordStore`] trait defines the read-only contract the merge
//! engine depends on. An in-memory backend serves tests and embedded use;
//! the SQLite backend (feature `sqlite`) reads the externally seeded leads
//! database.

mod traits;

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryStore;
pub use traits::{RecordStore, StorageError};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

//! In-memory storage backend.
//!
//! Thread-safe in-memory implementation of [`RecordStore`], intended for
//! tests, benchmarks, and embedded usage. `insert` doubles as the seeding
//! surface and enforces the per-table uid uniqueness constraint the seeded
//! database carries.

use std::collections::{BTreeSet, HashSet};
use std::sync::RwLock;

use crate::record::{DistinctField, LeadRecord, SourceTable};
use crate::storage::traits::{RecordStore, StorageError};

fn lock_err(context: &'static str) -> StorageError {
    StorageError::BackendError(format!("poisoned lock: {context}"))
}

#[derive(Debug, Default)]
struct TableState {
    rows: Vec<LeadRecord>,
    uids: HashSet<String>,
}

/// In-memory record store holding both source tables.
#[derive(Debug, Default)]
pub struct MemoryStore {
    schools: RwLock<TableState>,
    salesnav: RwLock<TableState>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, table: SourceTable) -> &RwLock<TableState> {
        match table {
            SourceTable::Schools => &self.schools,
            SourceTable::Salesnav => &self.salesnav,
        }
    }

    /// Seeds one row into a table.
    ///
    /// # Errors
    /// `DuplicateKey` when the row carries a non-empty uid already present
    /// in that table.
    pub fn insert(&self, table: SourceTable, record: LeadRecord) -> Result<(), StorageError> {
        let mut state = self.table(table).write().map_err(|_| lock_err("insert"))?;

        if let Some(uid) = record.uid.as_deref() {
            if !uid.is_empty() && !state.uids.insert(uid.to_string()) {
                return Err(StorageError::DuplicateKey(uid.to_string()));
            }
        }

        state.rows.push(record);
        Ok(())
    }

    /// Number of rows seeded into one table.
    pub fn len(&self, table: SourceTable) -> Result<usize, StorageError> {
        let state = self.table(table).read().map_err(|_| lock_err("len"))?;
        Ok(state.rows.len())
    }

    /// Whether a table holds no rows.
    pub fn is_empty(&self, table: SourceTable) -> Result<bool, StorageError> {
        Ok(self.len(table)? == 0)
    }
}

impl RecordStore for MemoryStore {
    fn find_by_uid(
        &self,
        table: SourceTable,
        uid: &str,
    ) -> Result<Option<LeadRecord>, StorageError> {
        let state = self
            .table(table)
            .read()
            .map_err(|_| lock_err("find_by_uid"))?;

        Ok(state
            .rows
            .iter()
            .find(|record| record.uid.as_deref() == Some(uid))
            .cloned())
    }

    fn scan_identified(&self, table: SourceTable) -> Result<Vec<LeadRecord>, StorageError> {
        let state = self
            .table(table)
            .read()
            .map_err(|_| lock_err("scan_identified"))?;

        Ok(state
            .rows
            .iter()
            .filter(|record| record.identified())
            .cloned()
            .collect())
    }

    fn list_distinct(&self, field: DistinctField) -> Result<BTreeSet<String>, StorageError> {
        let mut values = BTreeSet::new();
        for table in SourceTable::ALL {
            let state = self
                .table(table)
                .read()
                .map_err(|_| lock_err("list_distinct"))?;

            for record in &state.rows {
                if let Some(value) = record.distinct_value(field) {
                    if !value.is_empty() {
                        values.insert(value.to_string());
                    }
                }
            }
        }
        Ok(values)
    }

    fn ping(&self) -> Result<(), StorageError> {
        self.schools.read().map_err(|_| lock_err("ping"))?;
        self.salesnav.read().map_err(|_| lock_err("ping"))?;
        Ok(())
    }
}

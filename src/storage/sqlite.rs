//! SQLite storage backend.
//!
//! Reads the leads database that the external scraping/seeding pipeline
//! writes (`leads_schools` and `leads_salesnav` tables). This backend never
//! writes: connections are opened read-only, one per call, and dropped
//! before returning, which keeps the store `Send + Sync` without any
//! connection pooling.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};

use crate::record::{DistinctField, LeadRecord, SourceTable};
use crate::storage::traits::{RecordStore, StorageError};

const COMMON_COLUMNS: &str = "slug, uid, user_name, linkedin_profile_url, linkedin_image_url, \
     title, location, req_school, req_country, timestamp";

fn backend_err(err: rusqlite::Error) -> StorageError {
    StorageError::BackendError(err.to_string())
}

fn select_clause(table: SourceTable) -> String {
    match table {
        SourceTable::Schools => format!(
            "SELECT {COMMON_COLUMNS}, \
             NULL AS about, NULL AS headline, NULL AS skills, NULL AS experience \
             FROM leads_schools"
        ),
        SourceTable::Salesnav => format!(
            "SELECT {COMMON_COLUMNS}, about, headline, skills, experience FROM leads_salesnav"
        ),
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<LeadRecord> {
    Ok(LeadRecord {
        slug: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
        uid: row.get(1)?,
        user_name: row.get(2)?,
        linkedin_profile_url: row.get(3)?,
        linkedin_image_url: row.get(4)?,
        title: row.get(5)?,
        location: row.get(6)?,
        req_school: row.get(7)?,
        req_country: row.get(8)?,
        timestamp: row.get(9)?,
        about: row.get(10)?,
        headline: row.get(11)?,
        skills: row.get(12)?,
        experience: row.get(13)?,
    })
}

/// Read-only SQLite record store over the seeded leads database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Opens the store, verifying the database file exists and answers a
    /// trivial query.
    ///
    /// # Errors
    /// `Unavailable` when the file is missing or the connection check fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(StorageError::Unavailable(format!(
                "database file not found: {}",
                path.display()
            )));
        }

        let store = Self { path };
        store.ping()?;
        Ok(store)
    }

    fn connection(&self) -> Result<Connection, StorageError> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|err| {
            StorageError::Unavailable(format!("cannot connect to database: {err}"))
        })
    }
}

impl RecordStore for SqliteStore {
    fn find_by_uid(
        &self,
        table: SourceTable,
        uid: &str,
    ) -> Result<Option<LeadRecord>, StorageError> {
        let conn = self.connection()?;
        let sql = format!("{} WHERE uid = ?1", select_clause(table));
        let mut stmt = conn.prepare(&sql).map_err(backend_err)?;
        stmt.query_row(params![uid], record_from_row)
            .optional()
            .map_err(backend_err)
    }

    fn scan_identified(&self, table: SourceTable) -> Result<Vec<LeadRecord>, StorageError> {
        let conn = self.connection()?;
        let sql = format!(
            "{} WHERE uid IS NOT NULL AND uid != ''",
            select_clause(table)
        );
        let mut stmt = conn.prepare(&sql).map_err(backend_err)?;
        let rows = stmt.query_map([], record_from_row).map_err(backend_err)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(backend_err)?);
        }
        Ok(records)
    }

    fn list_distinct(&self, field: DistinctField) -> Result<BTreeSet<String>, StorageError> {
        let conn = self.connection()?;
        // Column names come from the DistinctField whitelist, never from
        // caller input.
        let column = field.column_name();
        let sql = format!(
            "SELECT DISTINCT {column} FROM ( \
             SELECT {column} FROM leads_schools WHERE {column} IS NOT NULL AND {column} != '' \
             UNION \
             SELECT {column} FROM leads_salesnav WHERE {column} IS NOT NULL AND {column} != '' \
             )"
        );
        let mut stmt = conn.prepare(&sql).map_err(backend_err)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(backend_err)?;

        let mut values = BTreeSet::new();
        for row in rows {
            values.insert(row.map_err(backend_err)?);
        }
        Ok(values)
    }

    fn ping(&self) -> Result<(), StorageError> {
        let conn = self.connection()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(|err| StorageError::Unavailable(format!("connection check failed: {err}")))?;
        Ok(())
    }
}

//! SQLite store integration tests.
//!
//! Builds a database with the exact schema the external seeding pipeline
//! produces, then drives the full engine through the SQLite backend.

#![cfg(feature = "sqlite")]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::{params, Connection};
use tempfile::tempdir;

use leadmerge::storage::SqliteStore;
use leadmerge::{FilterParams, MergeEngine, SourceCategory, StorageError};

fn create_schema(conn: &Connection) {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS leads_schools (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             slug TEXT,
             uid TEXT UNIQUE,
             user_name TEXT,
             linkedin_profile_url TEXT,
             linkedin_image_url TEXT,
             title TEXT,
             location TEXT,
             req_school TEXT,
             req_country TEXT,
             timestamp TEXT
         );
         CREATE TABLE IF NOT EXISTS leads_salesnav (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             slug TEXT,
             uid TEXT UNIQUE,
             user_name TEXT,
             linkedin_profile_url TEXT,
             linkedin_image_url TEXT,
             title TEXT,
             location TEXT,
             about TEXT,
             headline TEXT,
             skills TEXT,
             experience TEXT,
             req_school TEXT,
             req_country TEXT,
             timestamp TEXT
         );",
    )
    .unwrap();
}

fn seed_sample_data(dir: &Path) -> PathBuf {
    let path = dir.join("leads.db");
    let conn = Connection::open(&path).unwrap();
    create_schema(&conn);

    conn.execute(
        "INSERT INTO leads_schools
             (slug, uid, user_name, linkedin_profile_url, title, location,
              req_school, req_country, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            "john-doe",
            "user_001",
            "John Doe",
            "https://linkedin.com/in/johndoe",
            "Software Engineer",
            "San Francisco, CA",
            "Stanford University",
            "USA",
            "2024-01-15 10:30:00",
        ],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO leads_schools
             (slug, uid, user_name, title, location, req_school, req_country, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            "jane-smith",
            "user_002",
            "Jane Smith",
            "Product Manager",
            "New York, NY",
            "Harvard University",
            "USA",
            "2024-01-16 14:20:00",
        ],
    )
    .unwrap();
    // Row without a uid: must stay invisible to merged views.
    conn.execute(
        "INSERT INTO leads_schools (slug, uid, user_name, location) \
         VALUES ('ghost-row', NULL, 'Ghost Row', 'Nowhere, XX')",
        [],
    )
    .unwrap();

    conn.execute(
        "INSERT INTO leads_salesnav
             (slug, uid, user_name, title, location, about, headline, skills,
              experience, req_school, req_country, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            "jane-smith",
            "user_002",
            "Jane Smith",
            "Senior Product Manager",
            "New York, NY",
            "Experienced product manager with 8+ years in tech startups",
            "Building innovative products that users love",
            "Product Management, Strategy, Analytics",
            "Senior PM at TechCorp (2020-present)",
            "Harvard University",
            "USA",
            "2024-01-18 11:15:00",
        ],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO leads_salesnav
             (slug, uid, user_name, title, location, req_school, req_country, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            "maria-garcia",
            "user_009",
            "Maria Garcia",
            "HR Manager",
            "Mexico City, MX",
            "Universidad Nacional Autónoma de México",
            "Mexico",
            "2024-01-24 10:45:00",
        ],
    )
    .unwrap();

    path
}

#[test]
fn open_refuses_missing_database_file() {
    let dir = tempdir().unwrap();
    let err = SqliteStore::open(dir.path().join("nope.db")).unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
}

#[test]
fn list_users_merges_across_sqlite_tables() {
    let dir = tempdir().unwrap();
    let store = SqliteStore::open(seed_sample_data(dir.path())).unwrap();
    let engine = MergeEngine::new(Arc::new(store));

    let users = engine.list_users(&FilterParams::new()).unwrap();
    let uids: Vec<&str> = users.iter().map(|u| u.uid.as_str()).collect();
    // Sorted by user_name ascending; the ghost row is gone.
    assert_eq!(uids, vec!["user_002", "user_001", "user_009"]);

    let jane = users.iter().find(|u| u.uid == "user_002").unwrap();
    assert_eq!(jane.source_category, SourceCategory::Both);
    assert_eq!(jane.color_class, "table-success");
    // Schools row is visited first, so the representative title is its value.
    assert_eq!(jane.title, "Product Manager");

    let maria = users.iter().find(|u| u.uid == "user_009").unwrap();
    assert_eq!(maria.source_category, SourceCategory::SalesnavOnly);
}

#[test]
fn filters_and_ordering_run_against_sqlite() {
    let dir = tempdir().unwrap();
    let store = SqliteStore::open(seed_sample_data(dir.path())).unwrap();
    let engine = MergeEngine::new(Arc::new(store));

    let both = engine
        .list_users(&FilterParams::new().source_filter("both"))
        .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].uid, "user_002");

    let usa_desc = engine
        .list_users(
            &FilterParams::new()
                .country_filter("usa")
                .order_by("user_name")
                .order_direction("DESC"),
        )
        .unwrap();
    let names: Vec<&str> = usa_desc.iter().map(|u| u.user_name.as_str()).collect();
    assert_eq!(names, vec!["John Doe", "Jane Smith"]);
}

#[test]
fn detail_coalesces_sqlite_rows() {
    let dir = tempdir().unwrap();
    let store = SqliteStore::open(seed_sample_data(dir.path())).unwrap();
    let engine = MergeEngine::new(Arc::new(store));

    let jane = engine.user_detail("user_002").unwrap().unwrap();
    assert_eq!(jane.title, "Senior Product Manager");
    assert_eq!(jane.skills, "Product Management, Strategy, Analytics");
    assert!(jane.in_schools_table);
    assert!(jane.in_salesnav_table);
    assert_eq!(jane.schools_timestamp.as_deref(), Some("2024-01-16 14:20:00"));
    assert_eq!(jane.salesnav_timestamp.as_deref(), Some("2024-01-18 11:15:00"));

    let john = engine.user_detail("user_001").unwrap().unwrap();
    assert!(john.in_schools_table);
    assert!(!john.in_salesnav_table);
    assert_eq!(john.about, "");

    assert!(engine.user_detail("user_404").unwrap().is_none());
}

#[test]
fn filter_options_come_from_both_sqlite_tables() {
    let dir = tempdir().unwrap();
    let store = SqliteStore::open(seed_sample_data(dir.path())).unwrap();
    let engine = MergeEngine::new(Arc::new(store));

    let options = engine.filter_options().unwrap();
    assert_eq!(
        options.locations,
        vec!["Mexico City, MX", "New York, NY", "Nowhere, XX", "San Francisco, CA"]
    );
    assert_eq!(options.countries, vec!["Mexico", "USA"]);
    assert_eq!(options.sources, vec!["schools_only", "salesnav_only", "both"]);
}

#[test]
fn health_probe_reflects_reachability() {
    let dir = tempdir().unwrap();
    let path = seed_sample_data(dir.path());
    let store = SqliteStore::open(&path).unwrap();
    let engine = MergeEngine::new(Arc::new(store));
    assert!(engine.storage_ready());
}

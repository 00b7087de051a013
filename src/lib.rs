//! # Leadmerge - Deduplicated Lead Views Over Scraped Profile Records
//!
//! Leadmerge unifies professional-profile records scraped from two
//! independent sources ("schools" and "salesnav") into one logical user
//! view. Records sharing a uid are grouped, tagged with provenance, and
//! coalesced field by field; callers filter and sort the merged view and
//! drill into a per-uid detail projection.
//!
//! ## Core Concepts
//!
//! - **LeadRecord**: one raw scraped row, exactly as a source table holds it
//! - **SourceTable**: which of the two tables a row came from
//! - **MergedUser**: the deduplicated list projection with provenance
//! - **MergedUserDetail**: the per-uid projection with field coalescing
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use leadmerge::{FilterParams, LeadRecord, MemoryStore, MergeEngine, SourceTable};
//!
//! let store = MemoryStore::new();
//! store.insert(
//!     SourceTable::Schools,
//!     LeadRecord::builder().slug("jane-smith").uid("user_002").user_name("Jane Smith").build(),
//! )?;
//!
//! let engine = MergeEngine::new(Arc::new(store));
//! let users = engine.list_users(&FilterParams::new().search("Jane"))?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod coalesce;
pub mod engine;
pub mod error;
pub mod filter;
pub mod merged;
pub mod record;
pub mod storage;

#[cfg(feature = "transport-http")]
pub mod transport;

// Re-export primary types at crate root for convenience
pub use engine::MergeEngine;
pub use error::{LeadError, LeadResult};
pub use filter::{FilterParams, SortColumn, SortDirection, SourceFilter};
pub use merged::{FilterOptions, MergedUser, MergedUserDetail, SourceCategory};
pub use record::{DistinctField, LeadRecord, SourceTable};
pub use storage::{MemoryStore, RecordStore, StorageError};

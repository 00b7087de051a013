//! Merge/query engine.
//!
//! The core of the system: unions both record tables by uid, computes
//! provenance, coalesces fields, and applies filters and ordering. Every
//! operation is a self-contained read-only transaction against the record
//! store; the engine holds no state besides the store handle and never
//! retries.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::coalesce;
use crate::error::LeadResult;
use crate::filter::{FilterParams, SortDirection};
use crate::merged::{placeholder, FilterOptions, MergedUser, MergedUserDetail, SourceCategory};
use crate::record::{DistinctField, LeadRecord, SourceTable};
use crate::storage::RecordStore;

/// Per-uid accumulator for the list-merge union.
///
/// Rows arrive schools-first, so the representative value per field is the
/// first non-empty candidate in that order; in practice a uid occurs at
/// most once per table.
#[derive(Debug, Default)]
struct MergedGroup {
    in_schools: bool,
    in_salesnav: bool,
    rows: Vec<LeadRecord>,
}

impl MergedGroup {
    fn absorb(&mut self, table: SourceTable, record: LeadRecord) {
        match table {
            SourceTable::Schools => self.in_schools = true,
            SourceTable::Salesnav => self.in_salesnav = true,
        }
        self.rows.push(record);
    }

    fn field(&self, get: impl Fn(&LeadRecord) -> Option<&str>) -> Option<String> {
        coalesce::first_non_empty(self.rows.iter().map(|record| get(record)))
    }

    fn category(&self) -> SourceCategory {
        match (self.in_schools, self.in_salesnav) {
            (true, true) => SourceCategory::Both,
            (true, false) => SourceCategory::SchoolsOnly,
            _ => SourceCategory::SalesnavOnly,
        }
    }

    fn into_user(self, uid: String) -> MergedUser {
        let category = self.category();
        MergedUser {
            uid,
            user_name: coalesce::or_placeholder(
                self.field(|r| r.user_name.as_deref()).as_deref(),
                placeholder::USER_NAME,
            ),
            title: coalesce::or_placeholder(
                self.field(|r| r.title.as_deref()).as_deref(),
                placeholder::TITLE,
            ),
            linkedin_profile_url: self.field(|r| r.linkedin_profile_url.as_deref()),
            linkedin_image_url: self.field(|r| r.linkedin_image_url.as_deref()),
            location: coalesce::or_placeholder(
                self.field(|r| r.location.as_deref()).as_deref(),
                placeholder::LOCATION,
            ),
            req_school: coalesce::or_placeholder(
                self.field(|r| r.req_school.as_deref()).as_deref(),
                placeholder::SCHOOL,
            ),
            req_country: coalesce::or_placeholder(
                self.field(|r| r.req_country.as_deref()).as_deref(),
                placeholder::COUNTRY,
            ),
            source_category: category,
            color_class: category.color_class(),
        }
    }
}

fn shared<'a, F>(row: &'a Option<LeadRecord>, get: F) -> Option<&'a str>
where
    F: Fn(&'a LeadRecord) -> Option<&'a str>,
{
    row.as_ref().and_then(get)
}

fn exclusive<'a, F>(row: &'a Option<LeadRecord>, get: F) -> String
where
    F: Fn(&'a LeadRecord) -> Option<&'a str>,
{
    row.as_ref().and_then(get).unwrap_or_default().to_string()
}

/// Executes merge/query operations against a pluggable record store.
pub struct MergeEngine {
    store: Arc<dyn RecordStore>,
}

impl MergeEngine {
    /// Creates an engine over a record store.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// The deduplicated, filtered, ordered list view.
    ///
    /// Rows without a uid never participate. Results are deterministic:
    /// grouping is uid-ordered and the sort is stable, so equal sort keys
    /// keep uid order and identical queries return identical sequences.
    ///
    /// # Errors
    /// `LeadError::Storage` when the store fails; no partial results.
    pub fn list_users(&self, filters: &FilterParams) -> LeadResult<Vec<MergedUser>> {
        let mut groups: BTreeMap<String, MergedGroup> = BTreeMap::new();
        for table in SourceTable::ALL {
            for record in self.store.scan_identified(table)? {
                let Some(uid) = record.uid.clone().filter(|uid| !uid.is_empty()) else {
                    continue;
                };
                groups.entry(uid).or_default().absorb(table, record);
            }
        }

        let mut users: Vec<MergedUser> = groups
            .into_iter()
            .map(|(uid, group)| group.into_user(uid))
            .filter(|user| filters.matches(user))
            .collect();

        let (column, direction) = filters.sort();
        users.sort_by(|a, b| {
            let ordering = column.key(a).cmp(column.key(b));
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        Ok(users)
    }

    /// The coalesced detail view for one uid, or `Ok(None)` when the uid is
    /// absent from both tables.
    ///
    /// Unlike the list view, detail fields are never placeholder-
    /// substituted: an empty string is a faithful answer here.
    ///
    /// # Errors
    /// `LeadError::Storage` when the store fails.
    pub fn user_detail(&self, uid: &str) -> LeadResult<Option<MergedUserDetail>> {
        let schools = self.store.find_by_uid(SourceTable::Schools, uid)?;
        let salesnav = self.store.find_by_uid(SourceTable::Salesnav, uid)?;

        if schools.is_none() && salesnav.is_none() {
            return Ok(None);
        }

        let detail = MergedUserDetail {
            uid: uid.to_string(),
            user_name: coalesce::longer_of(
                shared(&schools, |r| r.user_name.as_deref()),
                shared(&salesnav, |r| r.user_name.as_deref()),
            ),
            title: coalesce::longer_of(
                shared(&schools, |r| r.title.as_deref()),
                shared(&salesnav, |r| r.title.as_deref()),
            ),
            linkedin_profile_url: coalesce::longer_of(
                shared(&schools, |r| r.linkedin_profile_url.as_deref()),
                shared(&salesnav, |r| r.linkedin_profile_url.as_deref()),
            ),
            linkedin_image_url: coalesce::longer_of(
                shared(&schools, |r| r.linkedin_image_url.as_deref()),
                shared(&salesnav, |r| r.linkedin_image_url.as_deref()),
            ),
            location: coalesce::longer_of(
                shared(&schools, |r| r.location.as_deref()),
                shared(&salesnav, |r| r.location.as_deref()),
            ),
            req_school: coalesce::longer_of(
                shared(&schools, |r| r.req_school.as_deref()),
                shared(&salesnav, |r| r.req_school.as_deref()),
            ),
            req_country: coalesce::longer_of(
                shared(&schools, |r| r.req_country.as_deref()),
                shared(&salesnav, |r| r.req_country.as_deref()),
            ),
            about: exclusive(&salesnav, |r| r.about.as_deref()),
            headline: exclusive(&salesnav, |r| r.headline.as_deref()),
            skills: exclusive(&salesnav, |r| r.skills.as_deref()),
            experience: exclusive(&salesnav, |r| r.experience.as_deref()),
            in_schools_table: schools.is_some(),
            in_salesnav_table: salesnav.is_some(),
            schools_timestamp: schools.as_ref().and_then(|r| r.timestamp.clone()),
            salesnav_timestamp: salesnav.as_ref().and_then(|r| r.timestamp.clone()),
        };

        Ok(Some(detail))
    }

    /// Distinct values for the client-side filter controls.
    ///
    /// # Errors
    /// `LeadError::Storage` when the store fails.
    pub fn filter_options(&self) -> LeadResult<FilterOptions> {
        Ok(FilterOptions {
            locations: self
                .store
                .list_distinct(DistinctField::Location)?
                .into_iter()
                .collect(),
            schools: self
                .store
                .list_distinct(DistinctField::ReqSchool)?
                .into_iter()
                .collect(),
            countries: self
                .store
                .list_distinct(DistinctField::ReqCountry)?
                .into_iter()
                .collect(),
            sources: SourceCategory::ALL
                .iter()
                .map(|category| category.as_str().to_string())
                .collect(),
        })
    }

    /// Whether the record store currently answers its reachability probe.
    #[must_use]
    pub fn storage_ready(&self) -> bool {
        self.store.ping().is_ok()
    }
}

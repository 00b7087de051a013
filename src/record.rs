//! Raw record types for the two scraped source tables.
//!
//! A [`LeadRecord`] is one row exactly as the scraping pipeline wrote it:
//! every profile field may be missing, and only the salesnav table carries
//! the long-form fields (`about`, `headline`, `skills`, `experience`).
//! Records are immutable from the engine's perspective; the seeding process
//! owns all writes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two independently-populated source tables.
///
/// The table a row came from is the unit of provenance: a merged user is
/// classified by which table(s) contributed to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTable {
    /// Profiles scraped from school alumni listings (`leads_schools`).
    Schools,
    /// Profiles scraped from Sales Navigator (`leads_salesnav`).
    Salesnav,
}

impl SourceTable {
    /// Both tables, in the order the merge visits them.
    pub const ALL: [SourceTable; 2] = [Self::Schools, Self::Salesnav];

    /// SQL table name in the seeded database.
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Schools => "leads_schools",
            Self::Salesnav => "leads_salesnav",
        }
    }

    /// Short source name used in provenance classification.
    #[must_use]
    pub const fn source_name(self) -> &'static str {
        match self {
            Self::Schools => "schools",
            Self::Salesnav => "salesnav",
        }
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_name())
    }
}

/// Columns the filter-option discovery enumerates distinct values of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistinctField {
    /// The `location` column.
    Location,
    /// The `req_school` column.
    ReqSchool,
    /// The `req_country` column.
    ReqCountry,
}

impl DistinctField {
    /// SQL column name.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::ReqSchool => "req_school",
            Self::ReqCountry => "req_country",
        }
    }
}

/// One raw scraped profile row.
///
/// `uid` is the stable external identifier correlating a profile across both
/// tables; it is unique within a table but may be missing entirely, in which
/// case the row never surfaces in merged views. `slug` is a free-text
/// display identifier with no uniqueness guarantee.
///
/// The four long-form fields at the end are populated only for salesnav
/// rows and stay `None` for schools rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    /// Free-text identifier used for display/URL purposes only.
    pub slug: String,
    /// Stable cross-table identifier; rows without one are unmergeable.
    pub uid: Option<String>,
    /// Full name as scraped.
    pub user_name: Option<String>,
    /// LinkedIn profile URL.
    pub linkedin_profile_url: Option<String>,
    /// LinkedIn avatar URL.
    pub linkedin_image_url: Option<String>,
    /// Job title.
    pub title: Option<String>,
    /// Location string.
    pub location: Option<String>,
    /// School the scrape request targeted.
    pub req_school: Option<String>,
    /// Country the scrape request targeted.
    pub req_country: Option<String>,
    /// Scrape timestamp, verbatim from the source.
    pub timestamp: Option<String>,
    /// About section (salesnav only).
    pub about: Option<String>,
    /// Headline (salesnav only).
    pub headline: Option<String>,
    /// Skills summary (salesnav only).
    pub skills: Option<String>,
    /// Experience summary (salesnav only).
    pub experience: Option<String>,
}

impl LeadRecord {
    /// Creates a builder with every field unset.
    #[must_use]
    pub fn builder() -> LeadRecordBuilder {
        LeadRecordBuilder::default()
    }

    /// Whether this row carries a non-empty uid and can participate in
    /// merged views.
    #[must_use]
    pub fn identified(&self) -> bool {
        self.uid.as_deref().is_some_and(|uid| !uid.is_empty())
    }

    /// The row's value for a filter-option column.
    #[must_use]
    pub fn distinct_value(&self, field: DistinctField) -> Option<&str> {
        match field {
            DistinctField::Location => self.location.as_deref(),
            DistinctField::ReqSchool => self.req_school.as_deref(),
            DistinctField::ReqCountry => self.req_country.as_deref(),
        }
    }
}

/// Fluent builder for [`LeadRecord`], used by seeding code and tests.
#[derive(Debug, Clone, Default)]
pub struct LeadRecordBuilder {
    record: LeadRecord,
}

impl LeadRecordBuilder {
    /// Set the display slug.
    #[must_use]
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.record.slug = slug.into();
        self
    }

    /// Set the cross-table identifier.
    #[must_use]
    pub fn uid(mut self, uid: impl Into<String>) -> Self {
        self.record.uid = Some(uid.into());
        self
    }

    /// Set the scraped full name.
    #[must_use]
    pub fn user_name(mut self, user_name: impl Into<String>) -> Self {
        self.record.user_name = Some(user_name.into());
        self
    }

    /// Set the LinkedIn profile URL.
    #[must_use]
    pub fn linkedin_profile_url(mut self, url: impl Into<String>) -> Self {
        self.record.linkedin_profile_url = Some(url.into());
        self
    }

    /// Set the LinkedIn avatar URL.
    #[must_use]
    pub fn linkedin_image_url(mut self, url: impl Into<String>) -> Self {
        self.record.linkedin_image_url = Some(url.into());
        self
    }

    /// Set the job title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.record.title = Some(title.into());
        self
    }

    /// Set the location string.
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.record.location = Some(location.into());
        self
    }

    /// Set the requested school.
    #[must_use]
    pub fn req_school(mut self, school: impl Into<String>) -> Self {
        self.record.req_school = Some(school.into());
        self
    }

    /// Set the requested country.
    #[must_use]
    pub fn req_country(mut self, country: impl Into<String>) -> Self {
        self.record.req_country = Some(country.into());
        self
    }

    /// Set the scrape timestamp.
    #[must_use]
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.record.timestamp = Some(timestamp.into());
        self
    }

    /// Set the about section (salesnav only).
    #[must_use]
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.record.about = Some(about.into());
        self
    }

    /// Set the headline (salesnav only).
    #[must_use]
    pub fn headline(mut self, headline: impl Into<String>) -> Self {
        self.record.headline = Some(headline.into());
        self
    }

    /// Set the skills summary (salesnav only).
    #[must_use]
    pub fn skills(mut self, skills: impl Into<String>) -> Self {
        self.record.skills = Some(skills.into());
        self
    }

    /// Set the experience summary (salesnav only).
    #[must_use]
    pub fn experience(mut self, experience: impl Into<String>) -> Self {
        self.record.experience = Some(experience.into());
        self
    }

    /// Finish building the record.
    #[must_use]
    pub fn build(self) -> LeadRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert_eq!(SourceTable::Schools.table_name(), "leads_schools");
        assert_eq!(SourceTable::Salesnav.table_name(), "leads_salesnav");
        assert_eq!(SourceTable::Schools.source_name(), "schools");
        assert_eq!(SourceTable::Salesnav.source_name(), "salesnav");
        assert_eq!(format!("{}", SourceTable::Salesnav), "salesnav");
    }

    #[test]
    fn test_distinct_field_columns() {
        assert_eq!(DistinctField::Location.column_name(), "location");
        assert_eq!(DistinctField::ReqSchool.column_name(), "req_school");
        assert_eq!(DistinctField::ReqCountry.column_name(), "req_country");
    }

    #[test]
    fn test_builder_round_trip() {
        let record = LeadRecord::builder()
            .slug("jane-smith")
            .uid("user_002")
            .user_name("Jane Smith")
            .title("Product Manager")
            .location("New York, NY")
            .req_school("Harvard University")
            .req_country("USA")
            .timestamp("2024-01-16 14:20:00")
            .build();

        assert_eq!(record.slug, "jane-smith");
        assert_eq!(record.uid.as_deref(), Some("user_002"));
        assert_eq!(record.user_name.as_deref(), Some("Jane Smith"));
        assert_eq!(record.about, None);
        assert!(record.identified());
    }

    #[test]
    fn test_identified_requires_non_empty_uid() {
        assert!(!LeadRecord::builder().slug("no-uid").build().identified());
        assert!(!LeadRecord::builder().uid("").build().identified());
        assert!(LeadRecord::builder().uid("user_001").build().identified());
    }

    #[test]
    fn test_distinct_value_accessor() {
        let record = LeadRecord::builder()
            .location("London, UK")
            .req_country("UK")
            .build();

        assert_eq!(record.distinct_value(DistinctField::Location), Some("London, UK"));
        assert_eq!(record.distinct_value(DistinctField::ReqSchool), None);
        assert_eq!(record.distinct_value(DistinctField::ReqCountry), Some("UK"));
    }

    #[test]
    fn test_record_serialization() {
        let record = LeadRecord::builder().uid("user_001").user_name("John Doe").build();
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: LeadRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}

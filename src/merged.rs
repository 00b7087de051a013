//! Merged view types returned by the query engine.
//!
//! These are derived projections with query-scoped lifetime only; nothing
//! here is ever stored. The list view substitutes fixed placeholders for
//! missing text fields, the detail view deliberately does not.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder strings substituted into the list view when a source value is
/// null or the empty string. The detail view never substitutes.
pub mod placeholder {
    /// Missing `user_name`.
    pub const USER_NAME: &str = "Unknown User";
    /// Missing `title`.
    pub const TITLE: &str = "No Title";
    /// Missing `location`.
    pub const LOCATION: &str = "Unknown Location";
    /// Missing `req_school`.
    pub const SCHOOL: &str = "No School";
    /// Missing `req_country`.
    pub const COUNTRY: &str = "Unknown Country";
}

/// Which source table(s) contributed rows to a merged user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    /// Only the schools table holds this uid.
    SchoolsOnly,
    /// Only the salesnav table holds this uid.
    SalesnavOnly,
    /// Both tables hold this uid.
    Both,
}

impl SourceCategory {
    /// Every category, in the order the filter-option enumeration reports.
    pub const ALL: [SourceCategory; 3] = [Self::SchoolsOnly, Self::SalesnavOnly, Self::Both];

    /// Presentation hint for the category, fixed 1:1 mapping.
    #[must_use]
    pub const fn color_class(self) -> &'static str {
        match self {
            Self::SchoolsOnly => "table-info",
            Self::SalesnavOnly => "table-warning",
            Self::Both => "table-success",
        }
    }

    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SchoolsOnly => "schools_only",
            Self::SalesnavOnly => "salesnav_only",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the deduplicated list view.
///
/// Text fields are guaranteed non-empty: absent source values are replaced
/// by the [`placeholder`] constants. The two URL fields are the exception
/// and stay optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedUser {
    /// Cross-table identifier.
    pub uid: String,
    /// Full name, or [`placeholder::USER_NAME`].
    pub user_name: String,
    /// Job title, or [`placeholder::TITLE`].
    pub title: String,
    /// LinkedIn profile URL, if any source had one.
    pub linkedin_profile_url: Option<String>,
    /// LinkedIn avatar URL, if any source had one.
    pub linkedin_image_url: Option<String>,
    /// Location, or [`placeholder::LOCATION`].
    pub location: String,
    /// Requested school, or [`placeholder::SCHOOL`].
    pub req_school: String,
    /// Requested country, or [`placeholder::COUNTRY`].
    pub req_country: String,
    /// Which table(s) contributed.
    pub source_category: SourceCategory,
    /// Presentation hint derived from `source_category`.
    pub color_class: &'static str,
}

/// The per-uid detail view.
///
/// Shared fields are coalesced across both tables (longest non-empty value
/// wins); fields may legitimately be empty strings here, never placeholders.
/// Timestamps are reported verbatim per source so callers can judge
/// provenance recency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedUserDetail {
    /// Cross-table identifier.
    pub uid: String,
    /// Coalesced full name.
    pub user_name: String,
    /// Coalesced job title.
    pub title: String,
    /// Coalesced LinkedIn profile URL.
    pub linkedin_profile_url: String,
    /// Coalesced LinkedIn avatar URL.
    pub linkedin_image_url: String,
    /// Coalesced location.
    pub location: String,
    /// Coalesced requested school.
    pub req_school: String,
    /// Coalesced requested country.
    pub req_country: String,
    /// About section, from the salesnav row if present.
    pub about: String,
    /// Headline, from the salesnav row if present.
    pub headline: String,
    /// Skills summary, from the salesnav row if present.
    pub skills: String,
    /// Experience summary, from the salesnav row if present.
    pub experience: String,
    /// Whether a schools row exists for this uid.
    pub in_schools_table: bool,
    /// Whether a salesnav row exists for this uid.
    pub in_salesnav_table: bool,
    /// Schools-row scrape timestamp, verbatim; `None` when no row exists.
    pub schools_timestamp: Option<String>,
    /// Salesnav-row scrape timestamp, verbatim; `None` when no row exists.
    pub salesnav_timestamp: Option<String>,
}

/// Distinct values available for the client-side filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Sorted distinct non-empty locations across both tables.
    pub locations: Vec<String>,
    /// Sorted distinct non-empty requested schools across both tables.
    pub schools: Vec<String>,
    /// Sorted distinct non-empty requested countries across both tables.
    pub countries: Vec<String>,
    /// The fixed source-category enumeration.
    pub sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_class_mapping() {
        assert_eq!(SourceCategory::Both.color_class(), "table-success");
        assert_eq!(SourceCategory::SchoolsOnly.color_class(), "table-info");
        assert_eq!(SourceCategory::SalesnavOnly.color_class(), "table-warning");
    }

    #[test]
    fn test_category_wire_names() {
        assert_eq!(SourceCategory::SchoolsOnly.as_str(), "schools_only");
        assert_eq!(SourceCategory::SalesnavOnly.as_str(), "salesnav_only");
        assert_eq!(SourceCategory::Both.as_str(), "both");
        assert_eq!(format!("{}", SourceCategory::Both), "both");
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&SourceCategory::SchoolsOnly).unwrap();
        assert_eq!(json, "\"schools_only\"");

        let parsed: SourceCategory = serde_json::from_str("\"salesnav_only\"").unwrap();
        assert_eq!(parsed, SourceCategory::SalesnavOnly);
    }

    #[test]
    fn test_merged_user_serializes_null_urls() {
        let user = MergedUser {
            uid: "user_001".to_string(),
            user_name: "John Doe".to_string(),
            title: placeholder::TITLE.to_string(),
            linkedin_profile_url: None,
            linkedin_image_url: None,
            location: "San Francisco, CA".to_string(),
            req_school: "Stanford University".to_string(),
            req_country: "USA".to_string(),
            source_category: SourceCategory::SchoolsOnly,
            color_class: SourceCategory::SchoolsOnly.color_class(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert!(value["linkedin_profile_url"].is_null());
        assert_eq!(value["source_category"], "schools_only");
        assert_eq!(value["color_class"], "table-info");
    }

    #[test]
    fn test_placeholders_are_never_empty() {
        for p in [
            placeholder::USER_NAME,
            placeholder::TITLE,
            placeholder::LOCATION,
            placeholder::SCHOOL,
            placeholder::COUNTRY,
        ] {
            assert!(!p.is_empty());
        }
    }
}

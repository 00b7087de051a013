//! Filter and ordering parameters for the list operation.
//!
//! Input handling is deliberately lenient: unknown `source_filter` values
//! are ignored, unknown `order_by` columns silently fall back to
//! `user_name` ascending, and empty filter strings are no-ops. Nothing on
//! the read path rejects caller input.

use serde::{Deserialize, Serialize};

use crate::merged::{MergedUser, SourceCategory};

/// Whitelisted sort columns for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    /// Sort by coalesced full name.
    UserName,
    /// Sort by coalesced title.
    Title,
    /// Sort by coalesced location.
    Location,
    /// Sort by coalesced requested school.
    ReqSchool,
    /// Sort by coalesced requested country.
    ReqCountry,
}

impl SortColumn {
    /// Parses a column name; anything outside the whitelist is `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "user_name" => Some(Self::UserName),
            "title" => Some(Self::Title),
            "location" => Some(Self::Location),
            "req_school" => Some(Self::ReqSchool),
            "req_country" => Some(Self::ReqCountry),
            _ => None,
        }
    }

    /// The column's value on a merged user.
    #[must_use]
    pub fn key(self, user: &MergedUser) -> &str {
        match self {
            Self::UserName => &user.user_name,
            Self::Title => &user.title,
            Self::Location => &user.location,
            Self::ReqSchool => &user.req_school,
            Self::ReqCountry => &user.req_country,
        }
    }
}

impl Default for SortColumn {
    fn default() -> Self {
        Self::UserName
    }
}

/// Sort direction for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending (the default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Parses a direction string: descending only when it case-insensitively
    /// equals "DESC", ascending otherwise.
    #[must_use]
    pub fn parse(direction: &str) -> Self {
        if direction.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// Provenance filter for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFilter {
    /// Only uids present exclusively in the schools table.
    SchoolsOnly,
    /// Only uids present exclusively in the salesnav table.
    SalesnavOnly,
    /// Only uids present in more than one source.
    Both,
}

impl SourceFilter {
    /// Parses a filter name; unknown values are `None` (filter ignored).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "schools_only" => Some(Self::SchoolsOnly),
            "salesnav_only" => Some(Self::SalesnavOnly),
            "both" => Some(Self::Both),
            _ => None,
        }
    }

    /// Whether a merged user's provenance satisfies this filter.
    #[must_use]
    pub const fn admits(self, category: SourceCategory) -> bool {
        matches!(
            (self, category),
            (Self::SchoolsOnly, SourceCategory::SchoolsOnly)
                | (Self::SalesnavOnly, SourceCategory::SalesnavOnly)
                | (Self::Both, SourceCategory::Both)
        )
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Filter and ordering parameters for [`crate::MergeEngine::list_users`].
///
/// All predicates combine with logical AND and match case-insensitive
/// substrings. Raw strings are kept as the caller supplied them; parsing
/// into the typed sort/source enums happens lazily and leniently at query
/// time.
///
/// # Example
/// ```rust,ignore
/// let filters = FilterParams::new()
///     .search("jane")
///     .country_filter("USA")
///     .order_by("title")
///     .order_direction("DESC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    search: Option<String>,
    location_filter: Option<String>,
    school_filter: Option<String>,
    country_filter: Option<String>,
    source_filter: Option<String>,
    order_by: String,
    order_direction: String,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            search: None,
            location_filter: None,
            school_filter: None,
            country_filter: None,
            source_filter: None,
            order_by: "user_name".to_string(),
            order_direction: "ASC".to_string(),
        }
    }
}

impl FilterParams {
    /// Creates parameters with no filters and the default ordering
    /// (`user_name` ascending).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Substring match against name OR title OR location.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Substring match against location.
    #[must_use]
    pub fn location_filter(mut self, location: impl Into<String>) -> Self {
        self.location_filter = Some(location.into());
        self
    }

    /// Substring match against requested school.
    #[must_use]
    pub fn school_filter(mut self, school: impl Into<String>) -> Self {
        self.school_filter = Some(school.into());
        self
    }

    /// Substring match against requested country.
    #[must_use]
    pub fn country_filter(mut self, country: impl Into<String>) -> Self {
        self.country_filter = Some(country.into());
        self
    }

    /// Provenance filter; unrecognized values are silently ignored.
    #[must_use]
    pub fn source_filter(mut self, source: impl Into<String>) -> Self {
        self.source_filter = Some(source.into());
        self
    }

    /// Sort column; non-whitelisted names silently fall back to
    /// `user_name` ascending.
    #[must_use]
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    /// Sort direction; anything other than a case-insensitive "DESC" means
    /// ascending.
    #[must_use]
    pub fn order_direction(mut self, direction: impl Into<String>) -> Self {
        self.order_direction = direction.into();
        self
    }

    /// The effective typed ordering after lenient parsing.
    ///
    /// An invalid `order_by` resets the direction too: the fallback is
    /// always `user_name` ascending.
    #[must_use]
    pub fn sort(&self) -> (SortColumn, SortDirection) {
        match SortColumn::parse(&self.order_by) {
            Some(column) => (column, SortDirection::parse(&self.order_direction)),
            None => (SortColumn::UserName, SortDirection::Asc),
        }
    }

    /// The effective provenance filter, if the raw value parsed.
    #[must_use]
    pub fn source(&self) -> Option<SourceFilter> {
        self.source_filter.as_deref().and_then(SourceFilter::parse)
    }

    /// Evaluates every active predicate against one merged user.
    /// Empty filter strings count as inactive.
    #[must_use]
    pub fn matches(&self, user: &MergedUser) -> bool {
        if let Some(search) = active(&self.search) {
            if !(contains_ci(&user.user_name, search)
                || contains_ci(&user.title, search)
                || contains_ci(&user.location, search))
            {
                return false;
            }
        }

        if let Some(location) = active(&self.location_filter) {
            if !contains_ci(&user.location, location) {
                return false;
            }
        }

        if let Some(school) = active(&self.school_filter) {
            if !contains_ci(&user.req_school, school) {
                return false;
            }
        }

        if let Some(country) = active(&self.country_filter) {
            if !contains_ci(&user.req_country, country) {
                return false;
            }
        }

        if let Some(filter) = self.source() {
            if !filter.admits(user.source_category) {
                return false;
            }
        }

        true
    }
}

//! Field coalescing heuristics.
//!
//! Two distinct rules live here. The list view substitutes a fixed
//! placeholder for absent values; the detail view merges the two source
//! values and keeps the fuller one. "Absent" means null or the empty
//! string; whitespace-only values count as present.

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// List-view substitution: `value` when non-empty, else `placeholder`.
#[must_use]
pub fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    present(value).unwrap_or(placeholder).to_string()
}

/// First non-empty candidate, used to pick the representative value when a
/// uid contributed rows from more than one table.
pub fn first_non_empty<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .find_map(present)
        .map(str::to_string)
}

/// Detail-view coalescing: longest trimmed non-empty value wins.
///
/// When both values are non-empty the one with the greater trimmed length
/// is kept; equal lengths keep the schools value. When exactly one is
/// non-empty that one is kept. When both are absent the result is the
/// empty string.
#[must_use]
pub fn longer_of(schools: Option<&str>, salesnav: Option<&str>) -> String {
    match (present(schools), present(salesnav)) {
        (Some(a), Some(b)) => {
            if a.trim().chars().count() >= b.trim().chars().count() {
                a.to_string()
            } else {
                b.to_string()
            }
        }
        (Some(a), None) => a.to_string(),
        (None, Some(b)) => b.to_string(),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_placeholder_substitutes_absent() {
        assert_eq!(or_placeholder(None, "No Title"), "No Title");
        assert_eq!(or_placeholder(Some(""), "No Title"), "No Title");
        assert_eq!(or_placeholder(Some("Engineer"), "No Title"), "Engineer");
    }

    #[test]
    fn test_or_placeholder_keeps_whitespace_values() {
        // Only null/empty triggers substitution; a whitespace-only value
        // passes through untouched.
        assert_eq!(or_placeholder(Some("  "), "No Title"), "  ");
    }

    #[test]
    fn test_first_non_empty_picks_in_order() {
        assert_eq!(
            first_non_empty([None, Some(""), Some("a"), Some("b")]),
            Some("a".to_string())
        );
        assert_eq!(first_non_empty([None, Some("")]), None);
    }

    #[test]
    fn test_longer_of_prefers_fuller_value() {
        assert_eq!(longer_of(Some(""), Some("Senior PM")), "Senior PM");
        assert_eq!(longer_of(Some("Jane Smith"), Some("Jane S.")), "Jane Smith");
        assert_eq!(
            longer_of(Some("PM"), Some("Senior Product Manager")),
            "Senior Product Manager"
        );
    }

    #[test]
    fn test_longer_of_tie_keeps_schools() {
        assert_eq!(longer_of(Some("Alpha"), Some("Omega")), "Alpha");
    }

    #[test]
    fn test_longer_of_compares_trimmed_lengths() {
        // "PM   " trims to 2 chars, shorter than "Lead"; padding must not win.
        assert_eq!(longer_of(Some("PM   "), Some("Lead")), "Lead");
    }

    #[test]
    fn test_longer_of_single_and_absent_sides() {
        assert_eq!(longer_of(Some("Harvard"), None), "Harvard");
        assert_eq!(longer_of(None, Some("MIT")), "MIT");
        assert_eq!(longer_of(None, None), "");
        assert_eq!(longer_of(Some(""), Some("")), "");
    }
}

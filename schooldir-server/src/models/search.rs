//! Listing search term
//!
//! Case-insensitive substring match over name, address and city.

use serde::Deserialize;

use super::SchoolSummary;

/// Query string for `GET /api/schools`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// A non-blank, trimmed search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Parse a raw term; blank input means "no filter".
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let term = raw?.trim();
        if term.is_empty() {
            None
        } else {
            Some(Self(term.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a listed school matches this term.
    pub fn matches(&self, school: &SchoolSummary) -> bool {
        [&school.name, &school.address, &school.city]
            .iter()
            .any(|v| v.to_lowercase().contains(&self.0))
    }

    /// `%term%` for `ILIKE`, with LIKE metacharacters escaped.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

impl SearchParams {
    /// The effective search term, if any.
    pub fn term(&self) -> Option<SearchTerm> {
        SearchTerm::parse(self.q.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school(name: &str, address: &str, city: &str) -> SchoolSummary {
        SchoolSummary {
            id: 1,
            name: name.into(),
            address: address.into(),
            city: city.into(),
            image: None,
        }
    }

    #[test]
    fn blank_is_no_filter() {
        assert!(SearchTerm::parse(None).is_none());
        assert!(SearchTerm::parse(Some("")).is_none());
        assert!(SearchTerm::parse(Some("   ")).is_none());
    }

    #[test]
    fn matches_any_column_case_insensitively() {
        let s = school("Green Valley School", "42 Park Street", "Kolkata");
        assert!(SearchTerm::parse(Some("VALLEY")).unwrap().matches(&s));
        assert!(SearchTerm::parse(Some("park st")).unwrap().matches(&s));
        assert!(SearchTerm::parse(Some(" kolkata ")).unwrap().matches(&s));
        assert!(!SearchTerm::parse(Some("Chennai")).unwrap().matches(&s));
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        let term = SearchTerm::parse(Some("100%_a\\b")).unwrap();
        assert_eq!(term.like_pattern(), r"%100\%\_a\\b%");
    }
}

//! # Selection Filters
//!
//! Glob-style selectors over zone ids and locale tags, as accepted on the
//! command line and in configuration files:
//!
//! ```text
//! *                       everything
//! Australia/*             prefix match
//! en-AU,en-NZ,fr*         comma-separated alternatives
//! ```
//!
//! Matching ignores ASCII case. Locale selectors, built with
//! [`Selector::parse_locales`], also treat `_` and `-` as the same
//! character, so `EN_au` selects `en-AU`. Zone selectors do not:
//! `America/Port_of_Spain` is only selected by its own spelling.

use std::collections::BTreeSet;

use crate::error::TableError;

/// One alternative of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Any,
    Prefix(String),
    Exact(String),
}

/// A parsed selection filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    patterns: Vec<Pattern>,
    locale_tags: bool,
}

fn fold(s: &str, locale_tags: bool) -> String {
    s.chars()
        .map(|c| if locale_tags && c == '_' { '-' } else { c.to_ascii_lowercase() })
        .collect()
}

impl Selector {
    /// Parse a comma-separated filter over zone ids.
    ///
    /// # Errors
    ///
    /// Returns `TableError::InvalidSelectionFilter` if the filter or any of
    /// its alternatives is empty, or if `*` appears anywhere but at the end
    /// of an alternative.
    pub fn parse(filter: &str) -> Result<Self, TableError> {
        Self::parse_with(filter, false)
    }

    /// Parse a comma-separated filter over locale tags, where `_` and `-`
    /// are interchangeable. Errors as for [`Selector::parse`].
    pub fn parse_locales(filter: &str) -> Result<Self, TableError> {
        Self::parse_with(filter, true)
    }

    fn parse_with(filter: &str, locale_tags: bool) -> Result<Self, TableError> {
        let invalid = |reason: String| TableError::InvalidSelectionFilter {
            filter: filter.to_string(),
            reason,
        };

        let mut patterns = Vec::new();
        for part in filter.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(invalid("has an empty alternative".to_string()));
            }
            let pattern = match part.strip_suffix('*') {
                Some("") => Pattern::Any,
                Some(prefix) => Pattern::Prefix(fold(prefix, locale_tags)),
                None => Pattern::Exact(fold(part, locale_tags)),
            };
            let stem = match &pattern {
                Pattern::Any => "",
                Pattern::Prefix(s) | Pattern::Exact(s) => s.as_str(),
            };
            if stem.contains('*') {
                return Err(invalid(format!(
                    "alternative {part:?} may only use '*' as its last character"
                )));
            }
            patterns.push(pattern);
        }

        Ok(Self {
            source: filter.to_string(),
            patterns,
            locale_tags,
        })
    }

    /// A selector that matches everything.
    pub fn all() -> Self {
        Self {
            source: "*".to_string(),
            patterns: vec![Pattern::Any],
            locale_tags: false,
        }
    }

    /// The filter string this selector was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `candidate` is selected.
    pub fn matches(&self, candidate: &str) -> bool {
        let folded = fold(candidate, self.locale_tags);
        self.patterns.iter().any(|p| match p {
            Pattern::Any => true,
            Pattern::Prefix(prefix) => folded.starts_with(prefix.as_str()),
            Pattern::Exact(exact) => folded == *exact,
        })
    }

    /// The selected subset of `items`, in ascending order.
    pub fn select<'a, T, I>(&self, items: I) -> BTreeSet<T>
    where
        T: Ord + Clone + AsRef<str> + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        items
            .into_iter()
            .filter(|item| self.matches(item.as_ref()))
            .cloned()
            .collect()
    }

    /// Like [`Selector::select`], but at least one item must match.
    ///
    /// # Errors
    ///
    /// Returns `TableError::InvalidSelectionFilter` naming this filter when
    /// nothing matches.
    pub fn select_required<'a, T, I>(&self, items: I) -> Result<BTreeSet<T>, TableError>
    where
        T: Ord + Clone + AsRef<str> + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let selected = self.select(items);
        if selected.is_empty() {
            return Err(TableError::InvalidSelectionFilter {
                filter: self.source.clone(),
                reason: "matched nothing".to_string(),
            });
        }
        Ok(selected)
    }
}

impl std::str::FromStr for Selector {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{LocaleId, ZoneId};

    fn zones() -> Vec<ZoneId> {
        ["America/New_York", "Australia/Perth", "Australia/Sydney", "UTC"]
            .iter()
            .map(|z| ZoneId::new(*z).unwrap())
            .collect()
    }

    #[test]
    fn test_star_selects_everything() {
        let s = Selector::parse("*").unwrap();
        assert_eq!(s.select(&zones()).len(), 4);
        assert_eq!(Selector::all().select(&zones()).len(), 4);
    }

    #[test]
    fn test_prefix_selection() {
        let s = Selector::parse("Australia/*").unwrap();
        let picked: Vec<String> = s.select(&zones()).into_iter().map(String::from).collect();
        assert_eq!(picked, vec!["Australia/Perth", "Australia/Sydney"]);
    }

    #[test]
    fn test_alternatives_and_case() {
        let locales: Vec<LocaleId> = ["en-AU", "en-NZ", "en-US", "fr-FR"]
            .iter()
            .map(|t| LocaleId::parse(t).unwrap())
            .collect();
        let s = Selector::parse_locales("EN_au, fr*").unwrap();
        let picked: Vec<String> = s.select(&locales).into_iter().map(String::from).collect();
        assert_eq!(picked, vec!["en-AU", "fr-FR"]);
    }

    #[test]
    fn test_exact_does_not_prefix_match() {
        let s = Selector::parse("en").unwrap();
        assert!(s.matches("EN"));
        assert!(!s.matches("en-AU"));
    }

    #[test]
    fn test_required_selection_names_filter() {
        let s = Selector::parse("Europe/*").unwrap();
        let err = s.select_required(&zones()).unwrap_err();
        assert_eq!(
            err,
            TableError::InvalidSelectionFilter {
                filter: "Europe/*".to_string(),
                reason: "matched nothing".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_filters() {
        for bad in ["", " , ", "en,,fr", "*/Sydney", "Aus*tralia"] {
            assert!(
                matches!(Selector::parse(bad), Err(TableError::InvalidSelectionFilter { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_zone_selectors_keep_underscores() {
        let zones: Vec<ZoneId> = ["America/Port_of_Spain", "America/Port-au-Prince"]
            .iter()
            .map(|z| ZoneId::new(*z).unwrap())
            .collect();
        assert!(Selector::parse("America/Port-of-Spain").unwrap().select(&zones).is_empty());
        assert!(Selector::parse("America/Port_au_Prince").unwrap().select(&zones).is_empty());

        let picked = Selector::parse("america/port_of_spain").unwrap().select(&zones);
        assert_eq!(picked.len(), 1);
        assert!(Selector::parse_locales("en_AU").unwrap().matches("en-AU"));
        assert!(!Selector::parse("en_AU").unwrap().matches("en-AU"));
    }
}

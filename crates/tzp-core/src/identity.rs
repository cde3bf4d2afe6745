//! # Identity Newtypes
//!
//! Newtype wrappers for the two identifier namespaces of the table. These
//! prevent accidental identifier confusion: you cannot pass a `ZoneId`
//! where a `LocaleId` is expected.
//!
//! ## Canonical Form
//!
//! `LocaleId` stores the canonical language tag only. `en_au`, `EN-AU` and
//! `en-AU` all parse to `en-AU`, so equality, hashing and ordering of the
//! newtype are exactly those of the canonical tag string. This is the order
//! used when locale sets are written to the table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IdentifierKind, TableError};

/// A locale, identified by its canonical language tag (`en-AU`, `zh-Hant-TW`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleId(String);

/// A time-zone identifier (`Australia/Sydney`, `UTC`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneId(String);

impl LocaleId {
    /// Parse and canonicalize a language tag.
    ///
    /// Accepts `-` or `_` as the subtag separator and any letter case.
    ///
    /// # Errors
    ///
    /// Returns `TableError::MalformedIdentifier` for an empty tag, an empty
    /// subtag, a non-alphanumeric or over-long subtag, or a language subtag
    /// that is not 2–8 letters.
    pub fn parse(tag: &str) -> Result<Self, TableError> {
        let malformed = |reason: &str| TableError::MalformedIdentifier {
            kind: IdentifierKind::Locale,
            id: tag.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(malformed("empty language tag"));
        }

        let mut canonical = String::with_capacity(trimmed.len());
        let mut seen_script = false;
        let mut seen_region = false;

        for (i, subtag) in trimmed.split(['-', '_']).enumerate() {
            if subtag.is_empty() {
                return Err(malformed("empty subtag"));
            }
            if subtag.len() > 8 || !subtag.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(malformed("subtags must be 1-8 ASCII letters or digits"));
            }

            if i == 0 {
                if subtag.len() < 2 || !subtag.bytes().all(|b| b.is_ascii_alphabetic()) {
                    return Err(malformed("language subtag must be 2-8 letters"));
                }
                canonical.push_str(&subtag.to_ascii_lowercase());
                continue;
            }

            canonical.push('-');
            let alpha = subtag.bytes().all(|b| b.is_ascii_alphabetic());
            let digits = subtag.bytes().all(|b| b.is_ascii_digit());
            let region_slot = if seen_script { 2 } else { 1 };

            if i == 1 && subtag.len() == 4 && alpha {
                seen_script = true;
                let (first, rest) = subtag.split_at(1);
                canonical.push_str(&first.to_ascii_uppercase());
                canonical.push_str(&rest.to_ascii_lowercase());
            } else if !seen_region
                && i <= region_slot
                && ((subtag.len() == 2 && alpha) || (subtag.len() == 3 && digits))
            {
                seen_region = true;
                canonical.push_str(&subtag.to_ascii_uppercase());
            } else {
                canonical.push_str(&subtag.to_ascii_lowercase());
            }
        }

        Ok(Self(canonical))
    }

    /// The canonical language tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The language subtag alone (`en` for `en-AU`).
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl ZoneId {
    /// Validate a time-zone identifier.
    ///
    /// Zone ids are kept verbatim; they must be non-empty and free of
    /// whitespace and control characters.
    ///
    /// # Errors
    ///
    /// Returns `TableError::MalformedIdentifier` if the id is empty or
    /// contains whitespace or control characters.
    pub fn new(id: impl Into<String>) -> Result<Self, TableError> {
        let id = id.into();
        let reason = if id.is_empty() {
            Some("empty zone id")
        } else if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
            Some("zone ids may not contain whitespace or control characters")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(TableError::MalformedIdentifier {
                kind: IdentifierKind::Zone,
                id,
                reason: reason.to_string(),
            }),
            None => Ok(Self(id)),
        }
    }

    /// The identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocaleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ZoneId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for LocaleId {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromStr for ZoneId {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LocaleId {
    type Error = TableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<String> for ZoneId {
    type Error = TableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LocaleId> for String {
    fn from(value: LocaleId) -> Self {
        value.0
    }
}

impl From<ZoneId> for String {
    fn from(value: ZoneId) -> Self {
        value.0
    }
}

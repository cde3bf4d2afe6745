//! # Catalog Document Model
//!
//! Serde types for the catalog file. Unknown keys are rejected everywhere
//! so a misspelt field fails loudly instead of silently taking a default.
//!
//! ```yaml
//! locales:
//!   - tag: en-AU
//!     first_day_of_week: 2
//!     minimal_days_in_first_week: 1
//! zones:
//!   - id: Australia/Sydney
//!     raw_offset_millis: 36000000
//!     transitions:
//!       - { at: 1696089600000, offset_millis: 39600000, dst: true }
//!     display:
//!       default:
//!         short_name: AEST
//!         short_name_daylight: AEDT
//!         long_name: Australian Eastern Standard Time
//!         long_name_daylight: Australian Eastern Daylight Time
//!       overrides:
//!         fr: { short_name: UTC+10:00, ... }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tzp_core::{DisplayFacts, LocaleId, ZoneId};

/// The whole catalog file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    #[serde(default)]
    pub locales: Vec<LocaleRecord>,
    #[serde(default)]
    pub zones: Vec<ZoneRecord>,
}

/// One locale and its week conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleRecord {
    pub tag: LocaleId,
    /// 1 = Sunday through 7 = Saturday.
    pub first_day_of_week: i32,
    pub minimal_days_in_first_week: i32,
}

/// One zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneRecord {
    pub id: ZoneId,
    pub raw_offset_millis: i32,
    /// Offset changes, strictly ascending by instant.
    #[serde(default)]
    pub transitions: Vec<Transition>,
    pub display: DisplayNames,
}

/// An offset change taking effect at `at` (milliseconds since the epoch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transition {
    pub at: i64,
    pub offset_millis: i32,
    #[serde(default)]
    pub dst: bool,
}

/// A zone's display names: a default bundle plus per-locale overrides.
///
/// Override keys are either full tags (`en-GB`) or bare languages (`fr`).
/// They are canonicalized like any other locale, so `EN_gb` and `en-GB`
/// name the same override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayNames {
    pub default: DisplayFacts,
    #[serde(default)]
    pub overrides: BTreeMap<LocaleId, DisplayFacts>,
}

impl DisplayNames {
    /// Names for `locale`: an exact-tag override, else a language override,
    /// else the default.
    pub fn for_locale(&self, locale: &LocaleId) -> &DisplayFacts {
        if let Some(names) = self.overrides.get(locale) {
            return names;
        }
        self.overrides
            .iter()
            .find(|(key, _)| key.as_str() == locale.language())
            .map(|(_, names)| names)
            .unwrap_or(&self.default)
    }
}

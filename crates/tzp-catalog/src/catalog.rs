//! # Catalog — Zones, Locales and Their Facts
//!
//! A validated, indexed view of a [`CatalogDocument`]. The catalog is the
//! concrete [`ZoneCatalog`] and [`FactProvider`] behind `tzp generate`.
//!
//! ## Validation
//!
//! Loading fails on:
//! - a zone id or (canonical) locale tag listed twice,
//! - a first day of week or minimal-days value outside 1..=7,
//! - transitions that are not strictly ascending by instant.
//!
//! After loading, every lookup is total for the ids the catalog lists and
//! fails with `UnknownIdentifier` for anything else.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::debug;

use tzp_core::{CalendarFacts, DisplayFacts, LocaleId, TableError, ZoneId};
use tzp_table::{FactProvider, ZoneCatalog};

use crate::error::{CatalogError, CatalogResult};
use crate::model::{CatalogDocument, ZoneRecord};

/// The loaded catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    locales: BTreeMap<LocaleId, CalendarFacts>,
    zones: BTreeMap<ZoneId, ZoneRecord>,
}

impl Catalog {
    /// Load and validate a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::FileNotFound` if `path` does not exist,
    /// `CatalogError::YamlParse` if it is not a valid catalog document, and
    /// a validation error if the document breaks one of the rules above.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CatalogError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CatalogError::Io(e)
            }
        })?;
        let document: CatalogDocument =
            serde_yaml::from_str(&content).map_err(|e| CatalogError::YamlParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        let catalog = Self::from_document(document)?;
        debug!(
            path = %path.display(),
            zones = catalog.zones.len(),
            locales = catalog.locales.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog from YAML (or JSON) text.
    pub fn from_yaml_str(yaml: &str) -> CatalogResult<Self> {
        Self::from_document(serde_yaml::from_str(yaml)?)
    }

    /// Validate and index a parsed document.
    pub fn from_document(document: CatalogDocument) -> CatalogResult<Self> {
        let mut locales = BTreeMap::new();
        for record in document.locales {
            for (field, value) in [
                ("first_day_of_week", record.first_day_of_week),
                ("minimal_days_in_first_week", record.minimal_days_in_first_week),
            ] {
                if !(1..=7).contains(&value) {
                    return Err(CatalogError::CalendarOutOfRange {
                        locale: record.tag.to_string(),
                        field,
                        value,
                    });
                }
            }
            let facts =
                CalendarFacts::new(record.first_day_of_week, record.minimal_days_in_first_week);
            if locales.insert(record.tag.clone(), facts).is_some() {
                return Err(CatalogError::DuplicateLocale {
                    id: record.tag.to_string(),
                });
            }
        }

        let mut zones = BTreeMap::new();
        for record in document.zones {
            if let Some(index) = record
                .transitions
                .windows(2)
                .position(|w| w[0].at >= w[1].at)
            {
                return Err(CatalogError::UnorderedTransitions {
                    zone: record.id.to_string(),
                    index: index + 1,
                    at: record.transitions[index + 1].at,
                });
            }
            let id = record.id.clone();
            if zones.insert(id.clone(), record).is_some() {
                return Err(CatalogError::DuplicateZone { id: id.to_string() });
            }
        }

        Ok(Self { locales, zones })
    }

    /// The record for `zone`.
    pub fn zone(&self, zone: &ZoneId) -> Result<&ZoneRecord, TableError> {
        self.zones
            .get(zone)
            .ok_or_else(|| TableError::unknown_zone(zone.as_str()))
    }

    /// Number of zones.
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Number of locales.
    pub fn locale_count(&self) -> usize {
        self.locales.len()
    }
}

impl ZoneCatalog for Catalog {
    fn zone_ids(&self) -> BTreeSet<ZoneId> {
        self.zones.keys().cloned().collect()
    }

    fn locales(&self) -> BTreeSet<LocaleId> {
        self.locales.keys().cloned().collect()
    }
}

impl FactProvider for Catalog {
    fn raw_offset_millis(&self, zone: &ZoneId) -> Result<i32, TableError> {
        Ok(self.zone(zone)?.raw_offset_millis)
    }

    fn calendar_facts(
        &self,
        zone: &ZoneId,
        locale: &LocaleId,
    ) -> Result<CalendarFacts, TableError> {
        self.zone(zone)?;
        self.locales
            .get(locale)
            .copied()
            .ok_or_else(|| TableError::unknown_locale(locale.as_str()))
    }

    fn display_facts(&self, zone: &ZoneId, locale: &LocaleId) -> Result<DisplayFacts, TableError> {
        let record = self.zone(zone)?;
        if !self.locales.contains_key(locale) {
            return Err(TableError::unknown_locale(locale.as_str()));
        }
        Ok(record.display.for_locale(locale).clone())
    }
}

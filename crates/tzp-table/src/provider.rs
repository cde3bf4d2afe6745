//! # Collaborator Interfaces
//!
//! The table assembler knows nothing about where zone ids, locales, offsets,
//! display names or transition rules come from. It talks to three
//! capabilities:
//!
//! - [`ZoneCatalog`] — the universe of zone ids and locales, and glob
//!   selection over it.
//! - [`FactProvider`] — raw offsets, calendar facts and display facts for a
//!   (zone, locale) pair.
//! - [`ZoneRulesCodec`] — the opaque, self-describing transition-rules blob
//!   written after each zone's raw offset.
//!
//! All three are `Sync` so per-zone entries can be built on worker threads.

use std::collections::BTreeSet;
use std::fmt;

use tzp_core::{
    CalendarFacts, Comments, DataReader, DataWriter, DisplayFacts, LocaleId, Selector, TableError,
    ZoneId,
};

/// The catalog of zone ids and locales a table may be generated for.
pub trait ZoneCatalog {
    /// Every zone id the catalog knows.
    fn zone_ids(&self) -> BTreeSet<ZoneId>;

    /// Every locale the catalog knows.
    fn locales(&self) -> BTreeSet<LocaleId>;

    /// The zone ids selected by `filter` (`*`, `Australia/*`, ...).
    ///
    /// # Errors
    ///
    /// Returns `TableError::InvalidSelectionFilter` if the filter is
    /// malformed or selects nothing.
    fn filter_zone_ids(&self, filter: &str) -> Result<BTreeSet<ZoneId>, TableError> {
        Selector::parse(filter)?.select_required(&self.zone_ids())
    }

    /// The locales selected by `filter` (`*`, `en-AU,fr*`, ...).
    ///
    /// # Errors
    ///
    /// Returns `TableError::InvalidSelectionFilter` if the filter is
    /// malformed or selects nothing.
    fn filter_locales(&self, filter: &str) -> Result<BTreeSet<LocaleId>, TableError> {
        Selector::parse_locales(filter)?.select_required(&self.locales())
    }
}

/// Locale- and zone-aware facts the table records.
pub trait FactProvider: Sync {
    /// The zone's raw (standard time) offset from UTC in milliseconds.
    fn raw_offset_millis(&self, zone: &ZoneId) -> Result<i32, TableError>;

    /// Week conventions for `locale` in `zone`.
    fn calendar_facts(&self, zone: &ZoneId, locale: &LocaleId) -> Result<CalendarFacts, TableError>;

    /// The names `zone` displays under for `locale`.
    fn display_facts(&self, zone: &ZoneId, locale: &LocaleId) -> Result<DisplayFacts, TableError>;
}

/// Encoder/decoder for the per-zone transition-rules blob.
///
/// The blob must be self-describing: `read` has to consume exactly what
/// `write` produced without outside length information.
pub trait ZoneRulesCodec: Sync {
    /// The decoded rules.
    type Rules: fmt::Debug + Clone + PartialEq + Send;

    /// Look up the rules for `zone`.
    fn encode(&self, zone: &ZoneId) -> Result<Self::Rules, TableError>;

    /// Write `rules` to the table.
    fn write(&self, rules: &Self::Rules, out: &mut DataWriter) -> Result<(), TableError>;

    /// Read rules written by [`ZoneRulesCodec::write`].
    fn read(&self, input: &mut DataReader<'_>) -> Result<Self::Rules, TableError>;

    /// Describe `rules` on the commentary stream.
    fn comment(&self, rules: &Self::Rules, comments: &mut Comments) {
        comments.line(format_args!("rules: {rules:?}"));
    }
}

/// A rules codec that treats the blob as length-prefixed raw bytes.
///
/// Any codec whose `write` is a single [`DataWriter::write_bytes`] call can
/// be read back with `BlobCodec::reader()`, which lets a table be decoded
/// without knowing how the blob's contents are structured.
pub struct BlobCodec<F = fn(&ZoneId) -> Vec<u8>> {
    encode: F,
}

impl<F> BlobCodec<F>
where
    F: Fn(&ZoneId) -> Vec<u8> + Sync,
{
    /// A codec whose blob for each zone is whatever `encode` returns.
    pub fn new(encode: F) -> Self {
        Self { encode }
    }
}

impl BlobCodec {
    /// A codec for reading tables. Encoding yields an empty blob.
    pub fn reader() -> Self {
        fn empty(_: &ZoneId) -> Vec<u8> {
            Vec::new()
        }
        Self { encode: empty }
    }
}

impl<F> ZoneRulesCodec for BlobCodec<F>
where
    F: Fn(&ZoneId) -> Vec<u8> + Sync,
{
    type Rules = Vec<u8>;

    fn encode(&self, zone: &ZoneId) -> Result<Vec<u8>, TableError> {
        Ok((self.encode)(zone))
    }

    fn write(&self, rules: &Vec<u8>, out: &mut DataWriter) -> Result<(), TableError> {
        out.write_bytes(rules)
    }

    fn read(&self, input: &mut DataReader<'_>) -> Result<Vec<u8>, TableError> {
        input.read_bytes().map(<[u8]>::to_vec)
    }

    fn comment(&self, rules: &Vec<u8>, comments: &mut Comments) {
        comments.line(format_args!("rules: {} byte(s)", rules.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCatalog;

    impl ZoneCatalog for FixedCatalog {
        fn zone_ids(&self) -> BTreeSet<ZoneId> {
            ["Australia/Perth", "Australia/Sydney", "Europe/Paris"]
                .iter()
                .map(|z| ZoneId::new(*z).unwrap())
                .collect()
        }

        fn locales(&self) -> BTreeSet<LocaleId> {
            ["en-AU", "en-NZ", "fr-FR"]
                .iter()
                .map(|t| LocaleId::parse(t).unwrap())
                .collect()
        }
    }

    #[test]
    fn test_catalog_filters() {
        let zones = FixedCatalog.filter_zone_ids("Australia/*").unwrap();
        assert_eq!(zones.len(), 2);
        let locales = FixedCatalog.filter_locales("en*").unwrap();
        assert_eq!(locales.len(), 2);
    }

    #[test]
    fn test_locale_filters_fold_separators() {
        assert_eq!(FixedCatalog.filter_locales("EN_*").unwrap().len(), 2);
        assert_eq!(FixedCatalog.filter_zone_ids("australia/*").unwrap().len(), 2);
        assert!(FixedCatalog.filter_zone_ids("Australia_*").is_err());
    }

    #[test]
    fn test_catalog_filter_matching_nothing() {
        let err = FixedCatalog.filter_locales("de*").unwrap_err();
        assert!(matches!(
            err,
            TableError::InvalidSelectionFilter { ref filter, .. } if filter == "de*"
        ));
    }

    #[test]
    fn test_blob_codec_reads_what_it_writes() {
        let codec = BlobCodec::new(|z: &ZoneId| z.as_str().as_bytes().to_vec());
        let zone = ZoneId::new("UTC").unwrap();
        let rules = codec.encode(&zone).unwrap();
        let mut w = DataWriter::new();
        codec.write(&rules, &mut w).unwrap();
        let bytes = w.into_bytes();
        let mut r = DataReader::new(&bytes);
        assert_eq!(BlobCodec::reader().read(&mut r).unwrap(), b"UTC".to_vec());
        r.finish().unwrap();
    }
}

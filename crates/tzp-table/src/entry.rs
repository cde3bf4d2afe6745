//! # Zone Entries
//!
//! ```text
//! ZoneEntry := zoneId:string rawOffset:int32 zoneRulesBlob
//!              CalendarRecord DisplayRecord
//! ```
//!
//! An entry is built from the collaborators alone and holds no reference to
//! any other zone, so entries can be built concurrently and written in any
//! order the table chooses.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use tzp_core::{
    CalendarFacts, Comments, DataReader, DataWriter, DisplayFacts, Grouping, LocaleId, TableError,
    ZoneId,
};

use crate::provider::{FactProvider, ZoneRulesCodec};
use crate::record::CompactionRecord;

/// Everything the table records about one zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneEntry<R> {
    /// The zone identifier.
    pub zone_id: ZoneId,
    /// Raw (standard time) offset from UTC in milliseconds.
    pub raw_offset_millis: i32,
    /// Transition rules, as produced by the table's [`ZoneRulesCodec`].
    pub rules: R,
    /// Week conventions by locale.
    pub calendar: CompactionRecord<CalendarFacts>,
    /// Display names by locale.
    pub display: CompactionRecord<DisplayFacts>,
}

impl<R> ZoneEntry<R> {
    /// Build the entry for `zone` over `locales`.
    ///
    /// # Errors
    ///
    /// Returns `TableError::NoLocales` if `locales` is empty, and propagates
    /// any collaborator error (typically `UnknownIdentifier`).
    pub fn build<P, C>(
        zone: &ZoneId,
        locales: &BTreeSet<LocaleId>,
        provider: &P,
        codec: &C,
    ) -> Result<Self, TableError>
    where
        P: FactProvider + ?Sized,
        C: ZoneRulesCodec<Rules = R> + ?Sized,
    {
        let raw_offset_millis = provider.raw_offset_millis(zone)?;
        let rules = codec.encode(zone)?;

        let calendar_groups = Grouping::try_group(locales, |l| provider.calendar_facts(zone, l))?;
        let calendar_record =
            CompactionRecord::compact(calendar_groups).ok_or(TableError::NoLocales)?;

        let display_groups = Grouping::try_group(locales, |l| provider.display_facts(zone, l))?;
        let display_record =
            CompactionRecord::compact(display_groups).ok_or(TableError::NoLocales)?;

        // tracing's field macros bring `debug` and `display` into scope, so
        // no local may use either name inside `debug!`.
        debug!(
            zone = %zone,
            calendar_exceptions = calendar_record.exception_count(),
            display_exceptions = display_record.exception_count(),
            "built zone entry"
        );

        Ok(Self {
            zone_id: zone.clone(),
            raw_offset_millis,
            rules,
            calendar: calendar_record,
            display: display_record,
        })
    }

    /// Write the entry, mirroring every value to `comments`.
    ///
    /// `locales` is the set the entry was built over. It only feeds the
    /// commentary, which lists every locale group with its display names
    /// before the display record.
    pub fn write<C>(
        &self,
        codec: &C,
        locales: &BTreeSet<LocaleId>,
        out: &mut DataWriter,
        comments: &mut Comments,
    ) -> Result<(), TableError>
    where
        C: ZoneRulesCodec<Rules = R> + ?Sized,
    {
        comments.line(&self.zone_id);
        comments.indent();

        out.write_string(self.zone_id.as_str())?;

        comments.line(format_args!("rawOffset: {}", self.raw_offset_millis));
        out.write_i32(self.raw_offset_millis);

        codec.comment(&self.rules, comments);
        codec.write(&self.rules, out)?;

        self.calendar.write(out, comments)?;

        self.display.comment_groups(locales, comments);
        self.display.write(out, comments)?;

        comments.outdent();
        Ok(())
    }

    /// Read an entry written by [`ZoneEntry::write`].
    pub fn read<C>(codec: &C, input: &mut DataReader<'_>) -> Result<Self, TableError>
    where
        C: ZoneRulesCodec<Rules = R> + ?Sized,
    {
        let offset = input.position();
        let zone_id = ZoneId::new(input.read_string()?).map_err(|e| TableError::MalformedRecord {
            offset,
            reason: e.to_string(),
        })?;
        let raw_offset_millis = input.read_i32()?;
        let rules = codec.read(input)?;
        let calendar = CompactionRecord::read(input)?;
        let display = CompactionRecord::read(input)?;
        Ok(Self {
            zone_id,
            raw_offset_millis,
            rules,
            calendar,
            display,
        })
    }

    /// Calendar facts for `locale` in this zone.
    pub fn calendar_facts(&self, locale: &LocaleId) -> &CalendarFacts {
        self.calendar.resolve(locale)
    }

    /// Display facts for `locale` in this zone.
    pub fn display_facts(&self, locale: &LocaleId) -> &DisplayFacts {
        self.display.resolve(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::provider::BlobCodec;

    struct Names;

    impl FactProvider for Names {
        fn raw_offset_millis(&self, _: &ZoneId) -> Result<i32, TableError> {
            Ok(36_000_000)
        }

        fn calendar_facts(
            &self,
            _: &ZoneId,
            locale: &LocaleId,
        ) -> Result<CalendarFacts, TableError> {
            Ok(match locale.as_str() {
                "en-US" => CalendarFacts::new(1, 1),
                _ => CalendarFacts::new(2, 4),
            })
        }

        fn display_facts(
            &self,
            _: &ZoneId,
            locale: &LocaleId,
        ) -> Result<DisplayFacts, TableError> {
            Ok(match locale.language() {
                "fr" => DisplayFacts::new("UTC+10", "UTC+11", "heure de l'Est", "heure d'été"),
                _ => DisplayFacts::new("AEST", "AEDT", "Eastern Standard", "Eastern Daylight"),
            })
        }
    }

    fn locales(tags: &[&str]) -> BTreeSet<LocaleId> {
        tags.iter().map(|t| LocaleId::parse(t).unwrap()).collect()
    }

    fn sydney() -> ZoneId {
        ZoneId::new("Australia/Sydney").unwrap()
    }

    #[test]
    fn test_build_compacts_both_records() {
        let all = locales(&["en-AU", "en-US", "fr-CA", "fr-FR", "ja-JP"]);
        let entry = ZoneEntry::build(&sydney(), &all, &Names, &BlobCodec::reader()).unwrap();

        assert_eq!(entry.raw_offset_millis, 36_000_000);
        assert_eq!(*entry.calendar.default_value(), CalendarFacts::new(2, 4));
        assert_eq!(entry.calendar.exception_count(), 1);
        assert_eq!(entry.display.default_value().short_name, "AEST");
        assert_eq!(entry.display.exception_count(), 1);
        for locale in &all {
            let calendar = Names.calendar_facts(&sydney(), locale).unwrap();
            let names = Names.display_facts(&sydney(), locale).unwrap();
            assert_eq!(*entry.calendar_facts(locale), calendar);
            assert_eq!(*entry.display_facts(locale), names);
        }
    }

    #[test]
    fn test_build_without_locales() {
        let err = ZoneEntry::build(&sydney(), &BTreeSet::new(), &Names, &BlobCodec::reader());
        assert_eq!(err.unwrap_err(), TableError::NoLocales);
    }

    #[test]
    fn test_write_lists_display_groups() {
        let all = locales(&["en-AU", "fr-CA", "fr-FR", "ja-JP"]);
        let codec = BlobCodec::reader();
        let entry = ZoneEntry::build(&sydney(), &all, &Names, &codec).unwrap();

        let mut out = DataWriter::new();
        let mut comments = Comments::new();
        entry.write(&codec, &all, &mut out, &mut comments).unwrap();
        let text = comments.finish();

        let groups: Vec<&str> = text
            .lines()
            .filter(|l| l.contains("\"AEST\"") || l.contains("\"UTC+10\""))
            .filter(|l| l.contains('='))
            .collect();
        assert_eq!(
            groups,
            vec![
                "//   en-AU, ja-JP=\"AEST\" \"AEDT\" \"Eastern Standard\" \"Eastern Daylight\"",
                "//   fr-CA, fr-FR=\"UTC+10\" \"UTC+11\" \"heure de l'Est\" \"heure d'été\"",
            ]
        );

        let bytes = out.into_bytes();
        let mut input = DataReader::new(&bytes);
        assert_eq!(ZoneEntry::read(&codec, &mut input).unwrap(), entry);
        input.finish().unwrap();
    }
}

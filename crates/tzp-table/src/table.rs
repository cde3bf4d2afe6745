//! # Provider Table
//!
//! ```text
//! Table := zoneCount:int32 ZoneEntry*zoneCount
//! ```
//!
//! ## Invariant
//!
//! Entries are held, written and read in strictly ascending zone id order.
//! The reader rejects an out-of-order or repeated zone id, and rejects any
//! byte left over after the last entry, so a decoded table is exactly the
//! table that was written.

use serde::Serialize;

use std::collections::BTreeSet;

use tzp_core::{
    CalendarFacts, Comments, DataReader, DataWriter, DisplayFacts, LocaleId, TableError, ZoneId,
};

use crate::entry::ZoneEntry;
use crate::provider::ZoneRulesCodec;

/// A decoded (or freshly built) provider table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderTable<R> {
    zones: Vec<ZoneEntry<R>>,
}

/// Size figures for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TableStats {
    /// Number of zone entries.
    pub zones: usize,
    /// Calendar exception groups across all zones.
    pub calendar_exceptions: usize,
    /// Display exception groups across all zones.
    pub display_exceptions: usize,
    /// Locales listed explicitly by any exception group of any zone.
    pub explicit_locale_mentions: usize,
}

impl<R> ProviderTable<R> {
    /// Wrap entries that are already in strictly ascending zone order.
    ///
    /// # Errors
    ///
    /// Returns `TableError::MalformedRecord` naming the first zone that is
    /// out of order or repeated.
    pub fn new(zones: Vec<ZoneEntry<R>>) -> Result<Self, TableError> {
        if let Some(pair) = zones.windows(2).find(|w| w[0].zone_id >= w[1].zone_id) {
            return Err(TableError::MalformedRecord {
                offset: 0,
                reason: format!("zone {} follows {}", pair[1].zone_id, pair[0].zone_id),
            });
        }
        Ok(Self { zones })
    }

    /// All entries, ascending by zone id.
    pub fn entries(&self) -> &[ZoneEntry<R>] {
        &self.zones
    }

    /// Number of zone entries.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Returns true if the table has no zones.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zone ids in table order.
    pub fn zone_ids(&self) -> impl Iterator<Item = &ZoneId> {
        self.zones.iter().map(|e| &e.zone_id)
    }

    /// The entry for `zone`, if the table has one.
    pub fn entry(&self, zone: &ZoneId) -> Option<&ZoneEntry<R>> {
        self.zones
            .binary_search_by(|e| e.zone_id.cmp(zone))
            .ok()
            .map(|i| &self.zones[i])
    }

    /// Calendar facts for (`zone`, `locale`).
    ///
    /// # Errors
    ///
    /// Returns `TableError::UnknownIdentifier` if the table has no entry for
    /// `zone`. Locales are not checked: a locale outside the generated set
    /// resolves to the zone's default.
    pub fn calendar_facts(
        &self,
        zone: &ZoneId,
        locale: &LocaleId,
    ) -> Result<&CalendarFacts, TableError> {
        self.entry(zone)
            .map(|e| e.calendar_facts(locale))
            .ok_or_else(|| TableError::unknown_zone(zone.as_str()))
    }

    /// Display facts for (`zone`, `locale`). Same lookup rules as
    /// [`ProviderTable::calendar_facts`].
    pub fn display_facts(
        &self,
        zone: &ZoneId,
        locale: &LocaleId,
    ) -> Result<&DisplayFacts, TableError> {
        self.entry(zone)
            .map(|e| e.display_facts(locale))
            .ok_or_else(|| TableError::unknown_zone(zone.as_str()))
    }

    /// Exception and explicit-locale counts summed over every zone.
    pub fn stats(&self) -> TableStats {
        self.zones.iter().fold(
            TableStats {
                zones: self.zones.len(),
                ..TableStats::default()
            },
            |mut s, e| {
                s.calendar_exceptions += e.calendar.exception_count();
                s.display_exceptions += e.display.exception_count();
                s.explicit_locale_mentions +=
                    e.calendar.explicit_locales().count() + e.display.explicit_locales().count();
                s
            },
        )
    }

    /// Write the table, mirroring every value to `comments`. `locales` is
    /// the set the entries were built over; see [`ZoneEntry::write`].
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
        out.write_len("zone count", self.zones.len())?;
        for entry in &self.zones {
            entry.write(codec, locales, out, comments)?;
        }
        Ok(())
    }

    /// Serialize the table without commentary.
    pub fn to_bytes<C>(&self, codec: &C) -> Result<Vec<u8>, TableError>
    where
        C: ZoneRulesCodec<Rules = R> + ?Sized,
    {
        let mut out = DataWriter::new();
        self.write(codec, &BTreeSet::new(), &mut out, &mut Comments::sink())?;
        Ok(out.into_bytes())
    }

    /// Decode a complete table.
    ///
    /// # Errors
    ///
    /// Returns `TableError::UnexpectedEndOfData` on truncation,
    /// `TableError::TrailingData` if bytes remain after the last entry and
    /// `TableError::MalformedRecord` if zones are out of order or a record
    /// breaks its invariants.
    pub fn read<C>(bytes: &[u8], codec: &C) -> Result<Self, TableError>
    where
        C: ZoneRulesCodec<Rules = R> + ?Sized,
    {
        let mut input = DataReader::new(bytes);
        let count = input.read_len("zone count")?;

        // The count is untrusted; let the vector grow as entries are read.
        let mut zones: Vec<ZoneEntry<R>> = Vec::new();
        for _ in 0..count {
            let offset = input.position();
            let entry = ZoneEntry::read(codec, &mut input)?;
            if let Some(prev) = zones.last() {
                if prev.zone_id >= entry.zone_id {
                    return Err(TableError::MalformedRecord {
                        offset,
                        reason: format!("zone {} follows {}", entry.zone_id, prev.zone_id),
                    });
                }
            }
            zones.push(entry);
        }
        input.finish()?;
        Ok(Self { zones })
    }
}

//! # Table Generator
//!
//! Builds and serializes a provider table for a fixed set of zones and
//! locales.
//!
//! ## Design
//!
//! Generation is fan-out/fan-in with an ordering barrier. Zone entries are
//! independent, so with `parallel` enabled each one is built on the rayon
//! pool; results are collected back into ascending zone order before
//! anything is written. The byte stream and the commentary are then produced
//! by a single sequential pass, so the output does not depend on how the
//! work was scheduled.
//!
//! When several zones fail, the error reported is the one for the smallest
//! zone id, whichever thread finished first.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use tzp_core::{Comments, DataWriter, LocaleId, TableError, ZoneId};

use crate::digest::TableDigest;
use crate::entry::ZoneEntry;
use crate::provider::{FactProvider, ZoneRulesCodec};
use crate::table::{ProviderTable, TableStats};

/// Output of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedTable {
    /// The serialized table.
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// The commentary stream, if it was requested.
    #[serde(skip)]
    pub comments: Option<String>,
    /// Number of zones in the table.
    pub zone_count: usize,
    /// Number of locales every zone was compacted over.
    pub locale_count: usize,
    /// Exception and size figures.
    pub stats: TableStats,
    /// SHA-256 of `bytes`.
    pub digest: TableDigest,
}

/// Builder-style driver for one generation run.
pub struct TableGenerator<'a, P: ?Sized, C: ?Sized> {
    provider: &'a P,
    codec: &'a C,
    zones: BTreeSet<ZoneId>,
    locales: BTreeSet<LocaleId>,
    parallel: bool,
    comments: bool,
}

impl<'a, P, C> TableGenerator<'a, P, C>
where
    P: FactProvider + ?Sized,
    C: ZoneRulesCodec + ?Sized,
{
    /// A generator for `zones` × `locales`. Parallel building is on and
    /// commentary is off by default.
    pub fn new(
        provider: &'a P,
        codec: &'a C,
        zones: BTreeSet<ZoneId>,
        locales: BTreeSet<LocaleId>,
    ) -> Self {
        Self {
            provider,
            codec,
            zones,
            locales,
            parallel: true,
            comments: false,
        }
    }

    /// Build zone entries on the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Record the commentary stream alongside the bytes.
    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    /// Build every zone entry without serializing.
    ///
    /// # Errors
    ///
    /// Returns `TableError::NoLocales` if the locale set is empty, otherwise
    /// the first collaborator error in zone order.
    pub fn build(&self) -> Result<ProviderTable<C::Rules>, TableError> {
        if self.locales.is_empty() {
            return Err(TableError::NoLocales);
        }

        let provider = self.provider;
        let codec = self.codec;
        let locales = &self.locales;
        let zones: Vec<&ZoneId> = self.zones.iter().collect();

        debug!(
            zones = zones.len(),
            locales = locales.len(),
            parallel = self.parallel,
            "building zone entries"
        );

        let results: Vec<Result<ZoneEntry<C::Rules>, TableError>> = if self.parallel {
            zones
                .par_iter()
                .map(|zone| ZoneEntry::build(zone, locales, provider, codec))
                .collect()
        } else {
            zones
                .iter()
                .map(|zone| ZoneEntry::build(zone, locales, provider, codec))
                .collect()
        };

        let entries = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        ProviderTable::new(entries)
    }

    /// Build and serialize the table.
    pub fn generate(&self) -> Result<GeneratedTable, TableError> {
        let table = self.build()?;

        let mut comments = if self.comments { Comments::new() } else { Comments::sink() };
        comments.line(format_args!(
            "Timezone ids: {}, locales: {}",
            self.zones.len(),
            self.locales.len()
        ));

        let mut out = DataWriter::new();
        table.write(self.codec, &self.locales, &mut out, &mut comments)?;
        let bytes = out.into_bytes();
        let digest = TableDigest::of(&bytes);
        let stats = table.stats();

        info!(
            zones = self.zones.len(),
            locales = self.locales.len(),
            calendar_exceptions = stats.calendar_exceptions,
            display_exceptions = stats.display_exceptions,
            data_size = bytes.len(),
            digest = %digest,
            "generated provider table"
        );

        Ok(GeneratedTable {
            bytes,
            comments: self.comments.then(|| comments.finish()),
            zone_count: self.zones.len(),
            locale_count: self.locales.len(),
            stats,
            digest,
        })
    }
}

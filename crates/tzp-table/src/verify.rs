//! # Round-Trip Verification
//!
//! Re-reads a serialized table and checks every (zone, locale) pair against
//! the fact provider that should have produced it. A table passes when it
//! holds exactly the requested zones and every raw offset, rules blob,
//! calendar fact and display fact matches what the provider answers
//! directly.
//!
//! Decoding failures are errors. Content differences are not: they are
//! collected into a [`VerifyReport`] so a caller sees every mismatch at
//! once.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use tzp_core::{LocaleId, TableError, ZoneId};

use crate::provider::{FactProvider, ZoneRulesCodec};
use crate::table::ProviderTable;

/// One disagreement between a table and its provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// The zone the disagreement was found in.
    pub zone: ZoneId,
    /// The locale, for per-locale facts.
    pub locale: Option<LocaleId>,
    /// Which fact disagreed (`rawOffset`, `rules`, `calendar`, `display`,
    /// or `zone` for a zone missing from or unexpected in the table).
    pub field: &'static str,
    /// What the provider answered.
    pub expected: String,
    /// What the table holds.
    pub actual: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.zone)?;
        if let Some(locale) = &self.locale {
            write!(f, " [{locale}]")?;
        }
        write!(f, " {}: expected {}, found {}", self.field, self.expected, self.actual)
    }
}

/// Result of [`verify_round_trip`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Zones present in both the table and the request.
    pub zones_checked: usize,
    /// (zone, locale) pairs compared.
    pub pairs_checked: usize,
    /// Every disagreement found, in zone then locale order.
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    /// Returns true if no mismatch was found.
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Decode `bytes` and compare it against `provider` for `zones` × `locales`.
///
/// # Errors
///
/// Returns any decoding error from [`ProviderTable::read`] and any
/// collaborator error raised while computing expected values.
pub fn verify_round_trip<P, C>(
    bytes: &[u8],
    provider: &P,
    codec: &C,
    zones: &BTreeSet<ZoneId>,
    locales: &BTreeSet<LocaleId>,
) -> Result<VerifyReport, TableError>
where
    P: FactProvider + ?Sized,
    C: ZoneRulesCodec + ?Sized,
{
    let table = ProviderTable::read(bytes, codec)?;
    let mut report = VerifyReport::default();

    for zone in table.zone_ids().filter(|z| !zones.contains(*z)) {
        report.mismatches.push(Mismatch {
            zone: zone.clone(),
            locale: None,
            field: "zone",
            expected: "absent".to_string(),
            actual: "present".to_string(),
        });
    }

    for zone in zones {
        let Some(entry) = table.entry(zone) else {
            report.mismatches.push(Mismatch {
                zone: zone.clone(),
                locale: None,
                field: "zone",
                expected: "present".to_string(),
                actual: "absent".to_string(),
            });
            continue;
        };
        report.zones_checked += 1;

        let mismatch = |locale: Option<&LocaleId>, field, expected: String, actual: String| {
            Mismatch {
                zone: zone.clone(),
                locale: locale.cloned(),
                field,
                expected,
                actual,
            }
        };

        let raw_offset = provider.raw_offset_millis(zone)?;
        if raw_offset != entry.raw_offset_millis {
            report.mismatches.push(mismatch(
                None,
                "rawOffset",
                raw_offset.to_string(),
                entry.raw_offset_millis.to_string(),
            ));
        }
        let rules = codec.encode(zone)?;
        if rules != entry.rules {
            report.mismatches.push(mismatch(
                None,
                "rules",
                format!("{rules:?}"),
                format!("{:?}", entry.rules),
            ));
        }

        for locale in locales {
            let calendar = provider.calendar_facts(zone, locale)?;
            if calendar != *entry.calendar_facts(locale) {
                report.mismatches.push(mismatch(
                    Some(locale),
                    "calendar",
                    calendar.to_string(),
                    entry.calendar_facts(locale).to_string(),
                ));
            }
            let names = provider.display_facts(zone, locale)?;
            if names != *entry.display_facts(locale) {
                report.mismatches.push(mismatch(
                    Some(locale),
                    "display",
                    names.to_string(),
                    entry.display_facts(locale).to_string(),
                ));
            }
        }
        report.pairs_checked += locales.len();
    }

    if report.is_ok() {
        info!(zones = report.zones_checked, pairs = report.pairs_checked, "table verified");
    } else {
        warn!(mismatches = report.mismatches.len(), "table does not match its provider");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tzp_core::{CalendarFacts, DisplayFacts};

    use crate::generator::TableGenerator;
    use crate::provider::BlobCodec;

    struct Shifted(i32);

    impl FactProvider for Shifted {
        fn raw_offset_millis(&self, _: &ZoneId) -> Result<i32, TableError> {
            Ok(self.0)
        }

        fn calendar_facts(
            &self,
            _: &ZoneId,
            locale: &LocaleId,
        ) -> Result<CalendarFacts, TableError> {
            Ok(if locale.language() == "en" {
                CalendarFacts::new(1, 1)
            } else {
                CalendarFacts::new(2, 4 + self.0.signum())
            })
        }

        fn display_facts(
            &self,
            zone: &ZoneId,
            locale: &LocaleId,
        ) -> Result<DisplayFacts, TableError> {
            let long = if self.0 > 1 { "renamed" } else { "" };
            Ok(DisplayFacts::new(zone.as_str(), locale.as_str(), long, ""))
        }
    }

    fn zones(ids: &[&str]) -> BTreeSet<ZoneId> {
        ids.iter().map(|z| ZoneId::new(*z).unwrap()).collect()
    }

    fn locales(tags: &[&str]) -> BTreeSet<LocaleId> {
        tags.iter().map(|t| LocaleId::parse(t).unwrap()).collect()
    }

    fn generate(provider: &Shifted, zs: &BTreeSet<ZoneId>, ls: &BTreeSet<LocaleId>) -> Vec<u8> {
        TableGenerator::new(provider, &BlobCodec::reader(), zs.clone(), ls.clone())
            .generate()
            .unwrap()
            .bytes
    }

    #[test]
    fn test_matching_table_verifies() {
        let zs = zones(&["Europe/Paris", "UTC"]);
        let ls = locales(&["de-DE", "en-GB", "fr-FR"]);
        let bytes = generate(&Shifted(0), &zs, &ls);
        let report =
            verify_round_trip(&bytes, &Shifted(0), &BlobCodec::reader(), &zs, &ls).unwrap();
        assert!(report.is_ok(), "{:?}", report.mismatches);
        assert_eq!(report.zones_checked, 2);
        assert_eq!(report.pairs_checked, 6);
    }

    #[test]
    fn test_changed_provider_reports_mismatches() {
        let zs = zones(&["UTC"]);
        let ls = locales(&["de-DE", "en-GB"]);
        let bytes = generate(&Shifted(0), &zs, &ls);
        let report =
            verify_round_trip(&bytes, &Shifted(1), &BlobCodec::reader(), &zs, &ls).unwrap();
        let fields: Vec<&str> = report.mismatches.iter().map(|m| m.field).collect();
        assert_eq!(fields, vec!["rawOffset", "calendar"]);
        assert_eq!(
            report.mismatches[1].to_string(),
            "UTC [de-DE] calendar: expected firstDayOfWeek=2 minimalDaysInFirstWeek=5, \
             found firstDayOfWeek=2 minimalDaysInFirstWeek=4"
        );
    }

    #[test]
    fn test_missing_and_extra_zones() {
        let ls = locales(&["en"]);
        let bytes = generate(&Shifted(0), &zones(&["UTC"]), &ls);
        let requested = zones(&["Europe/Paris"]);
        let report =
            verify_round_trip(&bytes, &Shifted(0), &BlobCodec::reader(), &requested, &ls).unwrap();
        assert_eq!(report.zones_checked, 0);
        assert_eq!(report.mismatches.len(), 2);
        assert_eq!(report.mismatches[0].zone.as_str(), "UTC");
        assert_eq!(report.mismatches[0].actual, "present");
        assert_eq!(report.mismatches[1].zone.as_str(), "Europe/Paris");
        assert_eq!(report.mismatches[1].actual, "absent");
    }

    #[test]
    fn test_corrupt_table_is_an_error() {
        let zs = zones(&["UTC"]);
        let ls = locales(&["en"]);
        let bytes = generate(&Shifted(0), &zs, &ls);
        let truncated = &bytes[..bytes.len() - 1];
        let err = verify_round_trip(truncated, &Shifted(0), &BlobCodec::reader(), &zs, &ls)
            .unwrap_err();
        assert!(matches!(err, TableError::UnexpectedEndOfData { .. }));
    }

    #[test]
    fn test_display_mismatch_reports_both_bundles() {
        let zs = zones(&["UTC"]);
        let ls = locales(&["en-GB"]);
        let bytes = generate(&Shifted(0), &zs, &ls);
        let report =
            verify_round_trip(&bytes, &Shifted(2), &BlobCodec::reader(), &zs, &ls).unwrap();
        let names: Vec<&Mismatch> =
            report.mismatches.iter().filter(|m| m.field == "display").collect();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].locale, Some(LocaleId::parse("en-GB").unwrap()));
        assert_eq!(names[0].expected, r#""UTC" "en-GB" "renamed" """#);
        assert_eq!(names[0].actual, r#""UTC" "en-GB" "" """#);
    }
}

//! # Compaction Records
//!
//! A `CompactionRecord<V>` stores one fact value per locale as a default plus
//! the groups of locales that differ from it:
//!
//! ```text
//! Record    := default:V exceptionCount:int32 Exception*exceptionCount
//! Exception := LocaleSet value:V
//! ```
//!
//! With `V = CalendarFacts` this is the calendar record (two `int32`s per
//! value); with `V = DisplayFacts` it is the display record (four strings per
//! value). The compaction and the framing are identical for both.
//!
//! ## Invariants
//!
//! - The default value is never an exception key.
//! - No exception group is empty and no locale appears in two groups.
//! - Exception groups are written ascending by value and each locale set
//!   ascending by tag, so the encoding is a function of the logical content.
//!
//! The reader enforces all three and rejects a stream that breaks them.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use tzp_core::{
    read_locale_set, write_locale_set, Comments, DataReader, DataWriter, FactValue, Grouping,
    LocaleId, TableError,
};

/// Default-plus-exceptions encoding of a locale → value mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactionRecord<V: Ord> {
    default: V,
    exceptions: BTreeMap<V, BTreeSet<LocaleId>>,
}

impl<V: FactValue> CompactionRecord<V> {
    /// Compact a grouping: the majority value becomes the default and every
    /// other bucket becomes an exception group.
    ///
    /// Returns `None` for an empty grouping, which has no default.
    pub fn compact(grouping: Grouping<V>) -> Option<Self> {
        let default = grouping.select_default()?.clone();
        let mut exceptions = grouping.into_groups();
        exceptions.remove(&default);
        Some(Self {
            default,
            exceptions,
        })
    }

    /// The value every locale not listed in an exception group resolves to.
    pub fn default_value(&self) -> &V {
        &self.default
    }

    /// The exception groups, ascending by value.
    pub fn exceptions(&self) -> &BTreeMap<V, BTreeSet<LocaleId>> {
        &self.exceptions
    }

    /// Number of exception groups.
    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    /// Every locale named by an exception group.
    pub fn explicit_locales(&self) -> impl Iterator<Item = &LocaleId> {
        self.exceptions.values().flatten()
    }

    /// The value `locale` resolves to.
    pub fn resolve(&self, locale: &LocaleId) -> &V {
        self.exceptions
            .iter()
            .find(|(_, locales)| locales.contains(locale))
            .map(|(value, _)| value)
            .unwrap_or(&self.default)
    }

    /// Resolve every locale of `universe`: the default for all of them, then
    /// each exception group's value for its own locales. Locales named by an
    /// exception group but absent from `universe` are ignored.
    pub fn expand<'a, I>(&self, universe: I) -> BTreeMap<LocaleId, V>
    where
        I: IntoIterator<Item = &'a LocaleId>,
    {
        let mut resolved: BTreeMap<LocaleId, V> = universe
            .into_iter()
            .map(|locale| (locale.clone(), self.default.clone()))
            .collect();
        for (value, locales) in &self.exceptions {
            for locale in locales {
                if let Some(slot) = resolved.get_mut(locale) {
                    *slot = value.clone();
                }
            }
        }
        resolved
    }

    /// Write the record, mirroring every value to `comments`.
    ///
    /// # Errors
    ///
    /// Returns `TableError::EncodingOverflow` if a count or string length
    /// does not fit an `int32`.
    pub fn write(&self, out: &mut DataWriter, comments: &mut Comments) -> Result<(), TableError> {
        self.default.comment("default ", comments);
        self.default.write(out)?;

        out.write_len("exception count", self.exceptions.len())?;
        for (value, locales) in &self.exceptions {
            comments.line(format_args!("locales: {}", join_tags(locales)));
            write_locale_set(out, locales)?;
            comments.indent();
            value.comment("", comments);
            value.write(out)?;
            comments.outdent();
        }
        Ok(())
    }

    /// Read a record written by [`CompactionRecord::write`].
    ///
    /// # Errors
    ///
    /// Returns `TableError::UnexpectedEndOfData` on truncation and
    /// `TableError::MalformedRecord` if the stream breaks one of the record
    /// invariants.
    pub fn read(input: &mut DataReader<'_>) -> Result<Self, TableError> {
        let default = V::read(input)?;
        let count = input.read_len("exception count")?;

        let mut exceptions: BTreeMap<V, BTreeSet<LocaleId>> = BTreeMap::new();
        let mut seen: BTreeSet<LocaleId> = BTreeSet::new();
        for _ in 0..count {
            let offset = input.position();
            let locales = read_locale_set(input)?;
            let value = V::read(input)?;

            let malformed = |reason: String| TableError::MalformedRecord { offset, reason };
            if locales.is_empty() {
                return Err(malformed("empty exception group".to_string()));
            }
            if value == default {
                return Err(malformed(format!("exception repeats the default value {value:?}")));
            }
            if exceptions.contains_key(&value) {
                return Err(malformed(format!("duplicate exception value {value:?}")));
            }
            if let Some(dup) = locales.iter().find(|l| seen.contains(*l)) {
                return Err(malformed(format!("locale {dup} appears in two exception groups")));
            }

            seen.extend(locales.iter().cloned());
            exceptions.insert(value, locales);
        }

        Ok(Self {
            default,
            exceptions,
        })
    }
}

impl<V: FactValue + fmt::Display> CompactionRecord<V> {
    /// Mirror the full locale-to-value mapping over `universe` to
    /// `comments`, one `tags=value` line per group, sorted by the joined
    /// tags. Nothing is written to the table.
    pub fn comment_groups<'a, I>(&self, universe: I, comments: &mut Comments)
    where
        I: IntoIterator<Item = &'a LocaleId>,
    {
        if !comments.is_enabled() {
            return;
        }
        let grouping = Grouping::group(universe, |locale| self.resolve(locale).clone());
        let lines: BTreeMap<String, &V> = grouping
            .iter()
            .map(|(value, locales)| (join_tags(locales), value))
            .collect();
        for (tags, value) in lines {
            comments.line(format_args!("{tags}={value}"));
        }
    }
}

fn join_tags(locales: &BTreeSet<LocaleId>) -> String {
    locales
        .iter()
        .map(LocaleId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One exception group as it appears in serialized reports.
#[derive(Serialize)]
struct ExceptionGroup<'a, V> {
    value: &'a V,
    locales: &'a BTreeSet<LocaleId>,
}

impl<V: Ord + Serialize> Serialize for CompactionRecord<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Values are structs, which most formats cannot use as map keys, so
        // exceptions serialize as a list of groups in ascending value order.
        let groups: Vec<ExceptionGroup<'_, V>> = self
            .exceptions
            .iter()
            .map(|(value, locales)| ExceptionGroup { value, locales })
            .collect();
        let mut s = serializer.serialize_struct("CompactionRecord", 2)?;
        s.serialize_field("default", &self.default)?;
        s.serialize_field("exceptions", &groups)?;
        s.end()
    }
}

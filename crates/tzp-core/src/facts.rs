//! # Fact Values
//!
//! The two per-(zone, locale) values the table compacts:
//!
//! - [`CalendarFacts`] — first day of the week and minimal days in the first
//!   week, two `int32`s on the wire.
//! - [`DisplayFacts`] — the short/long, standard/daylight zone names, four
//!   strings on the wire.
//!
//! Both derive `Ord` over their fields in declaration order. The order has no
//! meaning beyond making majority selection deterministic: it is a plain
//! lexicographic comparison of integers and of UTF-8 bytes, identical on
//! every platform.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::{DataReader, DataWriter};
use crate::comments::Comments;
use crate::error::TableError;

/// A value that can be grouped, compacted and written to the table.
///
/// Implementors supply the total order used for tie-breaking (through `Ord`)
/// and their own wire encoding. Everything else about compaction is generic.
pub trait FactValue: Ord + Clone + fmt::Debug + Send + Sync {
    /// Write the value's fields.
    fn write(&self, out: &mut DataWriter) -> Result<(), TableError>;

    /// Read a value written by [`FactValue::write`].
    fn read(input: &mut DataReader<'_>) -> Result<Self, TableError>;

    /// Echo the value's fields to the commentary stream, one per line,
    /// each label preceded by `prefix`.
    fn comment(&self, prefix: &str, comments: &mut Comments);
}

/// Week conventions of a calendar for one (zone, locale) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarFacts {
    /// First day of the week, 1 = Sunday through 7 = Saturday.
    pub first_day_of_week: i32,
    /// Minimal number of days the first week of a year must contain.
    pub minimal_days_in_first_week: i32,
}

impl CalendarFacts {
    /// Create calendar facts from the two week conventions.
    pub fn new(first_day_of_week: i32, minimal_days_in_first_week: i32) -> Self {
        Self {
            first_day_of_week,
            minimal_days_in_first_week,
        }
    }
}

impl fmt::Display for CalendarFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "firstDayOfWeek={} minimalDaysInFirstWeek={}",
            self.first_day_of_week, self.minimal_days_in_first_week
        )
    }
}

impl FactValue for CalendarFacts {
    fn write(&self, out: &mut DataWriter) -> Result<(), TableError> {
        out.write_i32(self.first_day_of_week);
        out.write_i32(self.minimal_days_in_first_week);
        Ok(())
    }

    fn read(input: &mut DataReader<'_>) -> Result<Self, TableError> {
        let first_day_of_week = input.read_i32()?;
        let minimal_days_in_first_week = input.read_i32()?;
        Ok(Self::new(first_day_of_week, minimal_days_in_first_week))
    }

    fn comment(&self, prefix: &str, comments: &mut Comments) {
        comments.line(format_args!("{prefix}firstDayOfWeek: {}", self.first_day_of_week));
        comments.line(format_args!(
            "{prefix}minimalDaysInFirstWeek: {}",
            self.minimal_days_in_first_week
        ));
    }
}

/// The names a zone displays under for one locale.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayFacts {
    /// Short name in standard time (`AEST`).
    pub short_name: String,
    /// Short name in daylight time (`AEDT`).
    pub short_name_daylight: String,
    /// Long name in standard time.
    pub long_name: String,
    /// Long name in daylight time.
    pub long_name_daylight: String,
}

impl DisplayFacts {
    /// Create a display bundle from its four names.
    pub fn new(
        short_name: impl Into<String>,
        short_name_daylight: impl Into<String>,
        long_name: impl Into<String>,
        long_name_daylight: impl Into<String>,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            short_name_daylight: short_name_daylight.into(),
            long_name: long_name.into(),
            long_name_daylight: long_name_daylight.into(),
        }
    }
}

impl fmt::Display for DisplayFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} {:?} {:?}",
            self.short_name, self.short_name_daylight, self.long_name, self.long_name_daylight
        )
    }
}

impl FactValue for DisplayFacts {
    fn write(&self, out: &mut DataWriter) -> Result<(), TableError> {
        out.write_string(&self.short_name)?;
        out.write_string(&self.short_name_daylight)?;
        out.write_string(&self.long_name)?;
        out.write_string(&self.long_name_daylight)?;
        Ok(())
    }

    fn read(input: &mut DataReader<'_>) -> Result<Self, TableError> {
        Ok(Self {
            short_name: input.read_string()?,
            short_name_daylight: input.read_string()?,
            long_name: input.read_string()?,
            long_name_daylight: input.read_string()?,
        })
    }

    fn comment(&self, prefix: &str, comments: &mut Comments) {
        comments.line(format_args!("{prefix}shortDisplayName: {}", self.short_name));
        comments.line(format_args!(
            "{prefix}shortDisplayNameDaylight: {}",
            self.short_name_daylight
        ));
        comments.line(format_args!("{prefix}longDisplayName: {}", self.long_name));
        comments.line(format_args!(
            "{prefix}longDisplayNameDaylight: {}",
            self.long_name_daylight
        ));
    }
}

//! # tzp-core — Foundational Types for the Time-Zone Provider Table
//!
//! This crate is the leaf of the workspace. It defines the primitives every
//! other crate builds on when producing or consuming the compact binary
//! table of per-zone, per-locale display text and calendar conventions.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `LocaleId` and `ZoneId` are validated,
//!    canonicalized newtypes. Two locales are equal iff their canonical
//!    language tags are equal; no bare strings cross crate boundaries.
//!
//! 2. **One byte path.** `DataWriter` and `DataReader` are the only types
//!    that touch the wire. Integers are fixed-width big-endian, strings are
//!    `int32` length-prefixed UTF-8. Every read error carries the byte offset.
//!
//! 3. **Canonical order everywhere.** Locale sets are written ascending by
//!    tag and grouping buckets are kept in a `BTreeMap`, so two runs over the
//!    same inputs produce byte-identical output.
//!
//! 4. **One grouping engine.** `Grouping<V>` partitions locales by fact value
//!    and picks the majority value with a fixed tie-break (smallest value
//!    wins). Calendar and display data both go through it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tzp-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod codec;
pub mod comments;
pub mod error;
pub mod facts;
pub mod grouping;
pub mod identity;
pub mod locale_set;
pub mod selector;

// Re-export primary types for ergonomic imports.
pub use codec::{DataReader, DataWriter};
pub use comments::Comments;
pub use error::{IdentifierKind, TableError};
pub use facts::{CalendarFacts, DisplayFacts, FactValue};
pub use grouping::Grouping;
pub use identity::{LocaleId, ZoneId};
pub use locale_set::{read_locale_set, write_locale_set};
pub use selector::Selector;

//! # tzp-table — Compaction and Assembly of the Provider Table
//!
//! Turns per-(zone, locale) facts into the compact binary table and reads it
//! back:
//!
//! - **Record** (`record.rs`): `CompactionRecord<V>`, the default-plus-
//!   exceptions encoding shared by the calendar and display records.
//!
//! - **Provider** (`provider.rs`): the collaborator capabilities the
//!   assembler consumes (`ZoneCatalog`, `FactProvider`, `ZoneRulesCodec`).
//!
//! - **Entry** (`entry.rs`): one zone's raw offset, rules blob and two
//!   compaction records.
//!
//! - **Table** (`table.rs`): the ordered sequence of entries, its exact
//!   reader, and per-(zone, locale) lookups.
//!
//! - **Generator** (`generator.rs`): fan-out/fan-in builder over rayon that
//!   produces the bytes, the commentary stream and a digest.
//!
//! - **Verify** (`verify.rs`): re-reads a table and compares it with the
//!   provider it came from.
//!
//! ## Crate Policy
//!
//! - Depends on `tzp-core` only.
//! - Knows nothing about transition rules beyond the `ZoneRulesCodec` seam.
//! - Output bytes depend only on the inputs, never on thread scheduling.

pub mod digest;
pub mod entry;
pub mod generator;
pub mod provider;
pub mod record;
pub mod table;
pub mod verify;

pub use digest::TableDigest;
pub use entry::ZoneEntry;
pub use generator::{GeneratedTable, TableGenerator};
pub use provider::{BlobCodec, FactProvider, ZoneCatalog, ZoneRulesCodec};
pub use record::CompactionRecord;
pub use table::{ProviderTable, TableStats};
pub use verify::{verify_round_trip, Mismatch, VerifyReport};

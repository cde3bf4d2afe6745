//! # tzp-catalog — YAML-Backed Zone and Locale Catalog
//!
//! Supplies the concrete collaborators the table assembler consumes:
//!
//! - **Model** (`model.rs`): serde types for the catalog file.
//!
//! - **Catalog** (`catalog.rs`): validated index of zones and locales;
//!   implements `ZoneCatalog` and `FactProvider`.
//!
//! - **Rules** (`rules.rs`): `TransitionRulesCodec`, the length-prefixed
//!   transition blob written for every zone.
//!
//! ## Crate Policy
//!
//! - Depends on `tzp-core` and `tzp-table` internally.
//! - Catalog files are read once at load; lookups never touch the
//!   filesystem.

pub mod catalog;
pub mod error;
pub mod model;
pub mod rules;

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult};
pub use model::{CatalogDocument, DisplayNames, LocaleRecord, Transition, ZoneRecord};
pub use rules::{TransitionRulesCodec, ZoneRules};

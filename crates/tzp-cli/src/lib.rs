//! # tzp-cli — CLI for the Time-Zone Provider Table
//!
//! Provides the `tzp` command-line interface.
//!
//! ## Subcommands
//!
//! - `tzp generate` — build a table from a catalog, or `--check` that an
//!   existing table is current.
//! - `tzp inspect` — decode a table and print a summary or JSON.
//! - `tzp verify` — check a table against its catalog, pair by pair.
//!
//! ```bash
//! tzp generate --catalog data/catalog.yaml --locales 'en*,fr*' --out table.bin
//! tzp generate --config tzp.yaml --check
//! tzp inspect table.bin --json
//! tzp verify table.bin --catalog data/catalog.yaml --locales 'en*,fr*'
//! ```
//!
//! ## Exit Codes
//!
//! 0 on success, 1 when a check or verification fails, 2 on any
//! operational error (unreadable file, malformed catalog, unknown id).

pub mod config;
pub mod generate;
pub mod inspect;
pub mod verify;

//! # Verify Subcommand
//!
//! Decodes a table and checks every selected (zone, locale) pair against
//! the catalog it should have been generated from.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use tzp_catalog::{Catalog, TransitionRulesCodec};
use tzp_table::{verify_round_trip, ZoneCatalog};

use crate::config::Config;

/// Arguments for the `tzp verify` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct VerifyArgs {
    /// Table file to verify.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Catalog file the table was generated from.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Zone selection filter used at generation time.
    #[arg(long)]
    pub zones: Option<String>,

    /// Locale selection filter used at generation time.
    #[arg(long)]
    pub locales: Option<String>,
}

/// Execute the verify subcommand.
///
/// Returns exit code: 0 if the table matches, 1 if it does not.
pub fn run_verify(args: &VerifyArgs, config: &Config) -> Result<u8> {
    let Some(catalog_path) = args.catalog.as_ref().or(config.catalog.as_ref()) else {
        bail!("no catalog given; pass --catalog or set `catalog` in the config file");
    };
    let zones_filter = args.zones.as_deref().or(config.zones.as_deref()).unwrap_or("*");
    let locales_filter = args.locales.as_deref().or(config.locales.as_deref()).unwrap_or("*");

    let catalog = Catalog::load(catalog_path)
        .with_context(|| format!("failed to load catalog: {}", catalog_path.display()))?;
    let zones = catalog.filter_zone_ids(zones_filter)?;
    let locales = catalog.filter_locales(locales_filter)?;

    let bytes = std::fs::read(&args.table)
        .with_context(|| format!("failed to read table: {}", args.table.display()))?;
    let codec = TransitionRulesCodec::new(&catalog);
    let report = verify_round_trip(&bytes, &catalog, &codec, &zones, &locales)
        .with_context(|| format!("failed to verify table: {}", args.table.display()))?;

    if report.is_ok() {
        println!(
            "OK: {} zone(s), {} (zone, locale) pair(s) match the catalog",
            report.zones_checked, report.pairs_checked
        );
        Ok(0)
    } else {
        println!("FAIL: {} mismatch(es)", report.mismatches.len());
        for mismatch in &report.mismatches {
            println!("  {mismatch}");
        }
        Ok(1)
    }
}

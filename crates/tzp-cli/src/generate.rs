//! # Generate Subcommand
//!
//! Builds the provider table for the selected zones and locales and writes
//! it (plus, optionally, the commentary stream) to disk.
//!
//! With `--check` nothing is written: the freshly generated bytes are
//! compared with the existing table and the command fails if they differ.
//! Generation is deterministic, so a mismatch means the catalog (or the
//! generator) changed since the table was written.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use tzp_catalog::{Catalog, TransitionRulesCodec};
use tzp_table::{TableDigest, TableGenerator, ZoneCatalog};

use crate::config::Config;

/// Default output path when neither the flag nor the config sets one.
pub const DEFAULT_OUT: &str = "provider-table.bin";

/// Arguments for the `tzp generate` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Catalog file (YAML or JSON).
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Zone selection filter, e.g. "*" or "Australia/*,UTC".
    #[arg(long)]
    pub zones: Option<String>,

    /// Locale selection filter, e.g. "*" or "en*,fr-FR".
    #[arg(long)]
    pub locales: Option<String>,

    /// Output path for the table.
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Also write the commentary stream to this path.
    #[arg(long)]
    pub comments: Option<PathBuf>,

    /// Build zone entries on a single thread.
    #[arg(long)]
    pub no_parallel: bool,

    /// Verify the existing table matches instead of writing it.
    #[arg(long)]
    pub check: bool,
}

/// Settings after merging flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSettings {
    pub catalog: PathBuf,
    pub zones: String,
    pub locales: String,
    pub out: PathBuf,
    pub comments: Option<PathBuf>,
    pub parallel: bool,
}

impl GenerateSettings {
    /// Merge `args` over `config`. Flags win.
    pub fn resolve(args: &GenerateArgs, config: &Config) -> Result<Self> {
        let Some(catalog) = args.catalog.clone().or_else(|| config.catalog.clone()) else {
            bail!("no catalog given; pass --catalog or set `catalog` in the config file");
        };
        Ok(Self {
            catalog,
            zones: pick(&args.zones, &config.zones, "*"),
            locales: pick(&args.locales, &config.locales, "*"),
            out: args
                .out
                .clone()
                .or_else(|| config.out.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT)),
            comments: args.comments.clone().or_else(|| config.comments.clone()),
            parallel: !args.no_parallel && config.parallel.unwrap_or(true),
        })
    }
}

fn pick(flag: &Option<String>, config: &Option<String>, default: &str) -> String {
    flag.as_deref()
        .or(config.as_deref())
        .unwrap_or(default)
        .to_string()
}

/// Execute the generate subcommand.
///
/// Returns exit code: 0 on success, 1 if --check fails.
pub fn run_generate(args: &GenerateArgs, config: &Config) -> Result<u8> {
    let settings = GenerateSettings::resolve(args, config)?;

    let catalog = Catalog::load(&settings.catalog)
        .with_context(|| format!("failed to load catalog: {}", settings.catalog.display()))?;
    let zones = catalog.filter_zone_ids(&settings.zones)?;
    let locales = catalog.filter_locales(&settings.locales)?;
    let codec = TransitionRulesCodec::new(&catalog);

    let generated = TableGenerator::new(&catalog, &codec, zones, locales)
        .parallel(settings.parallel)
        .with_comments(settings.comments.is_some())
        .generate()
        .context("failed to generate provider table")?;

    if args.check {
        return check_existing(&settings.out, &generated.bytes, generated.digest);
    }

    write_file(&settings.out, &generated.bytes)?;
    if let (Some(path), Some(text)) = (&settings.comments, &generated.comments) {
        write_file(path, text.as_bytes())?;
    }

    println!(
        "OK: wrote {} zone(s) x {} locale(s) to {}",
        generated.zone_count,
        generated.locale_count,
        settings.out.display()
    );
    println!("data size: {}", generated.bytes.len());
    println!("digest: {}", generated.digest);
    Ok(0)
}

fn check_existing(path: &Path, bytes: &[u8], digest: TableDigest) -> Result<u8> {
    if !path.exists() {
        println!("FAIL: table does not exist: {}", path.display());
        return Ok(1);
    }
    let existing =
        std::fs::read(path).with_context(|| format!("failed to read table: {}", path.display()))?;
    if existing == bytes {
        println!("OK: table is up to date");
        Ok(0)
    } else {
        println!("FAIL: table is outdated or differs from the generated table");
        println!("  Expected digest: {digest}");
        println!("  Existing digest: {}", TableDigest::of(&existing));
        Ok(1)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let config = Config {
            catalog: Some(PathBuf::from("/cfg/catalog.yaml")),
            locales: Some("fr*".to_string()),
            out: Some(PathBuf::from("/cfg/out.bin")),
            parallel: Some(true),
            ..Config::default()
        };
        let args = GenerateArgs {
            locales: Some("en*".to_string()),
            no_parallel: true,
            ..GenerateArgs::default()
        };
        let s = GenerateSettings::resolve(&args, &config).unwrap();
        assert_eq!(s.catalog, PathBuf::from("/cfg/catalog.yaml"));
        assert_eq!(s.zones, "*");
        assert_eq!(s.locales, "en*");
        assert_eq!(s.out, PathBuf::from("/cfg/out.bin"));
        assert!(!s.parallel);
    }

    #[test]
    fn defaults() {
        let args = GenerateArgs {
            catalog: Some(PathBuf::from("c.yaml")),
            ..GenerateArgs::default()
        };
        let s = GenerateSettings::resolve(&args, &Config::default()).unwrap();
        assert_eq!(s.out, PathBuf::from(DEFAULT_OUT));
        assert_eq!(s.comments, None);
        assert!(s.parallel);
    }

    #[test]
    fn catalog_is_required() {
        let err =
            GenerateSettings::resolve(&GenerateArgs::default(), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("--catalog"));
    }

    #[test]
    fn config_can_disable_parallelism() {
        let config = Config {
            catalog: Some(PathBuf::from("c.yaml")),
            parallel: Some(false),
            ..Config::default()
        };
        let s = GenerateSettings::resolve(&GenerateArgs::default(), &config).unwrap();
        assert!(!s.parallel);
    }
}

//! # Configuration File
//!
//! Optional YAML file supplying defaults for the subcommands. Every value
//! can be overridden on the command line; anything unset falls back to the
//! built-in default.
//!
//! ```yaml
//! catalog: data/catalog.yaml
//! zones: "*"
//! locales: "en*,fr*"
//! out: build/provider-table.bin
//! comments: build/provider-table.txt
//! parallel: true
//! ```
//!
//! Relative paths are resolved against the directory holding the config
//! file, so a config can be used from any working directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Parsed configuration. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Catalog file.
    pub catalog: Option<PathBuf>,
    /// Zone selection filter.
    pub zones: Option<String>,
    /// Locale selection filter.
    pub locales: Option<String>,
    /// Where `generate` writes the table.
    pub out: Option<PathBuf>,
    /// Where `generate` writes the commentary stream.
    pub comments: Option<PathBuf>,
    /// Build zone entries in parallel.
    pub parallel: Option<bool>,
}

impl Config {
    /// Load a config file and resolve its relative paths.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        let base = path.parent().unwrap_or(Path::new("."));
        for slot in [&mut config.catalog, &mut config.out, &mut config.comments] {
            if let Some(p) = slot.as_mut() {
                *p = resolve_path(p, base);
            }
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, otherwise return the empty config.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

//! Configuration for Tally
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the data dir (~/.local/share/tally/config/tally.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::import::ImportOptions;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/tally.toml");

/// Resolved application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Category store location
    pub categories_file: PathBuf,
    /// Label shown next to amounts
    pub currency: String,
    /// Column names and date format of the statement CSV
    pub import: ImportOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories_file: PathBuf::from("categories.json"),
            currency: "INR".to_string(),
            import: ImportOptions::default(),
        }
    }
}

impl Config {
    /// Load config from an explicit path, the data dir override, or the embedded default
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(default_path) => {
                    debug!("Using config override at {}", default_path.display());
                    fs::read_to_string(&default_path).map_err(|e| {
                        Error::Config(format!(
                            "Failed to read {}: {}",
                            default_path.display(),
                            e
                        ))
                    })?
                }
                None => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("tally.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    categories_file: Option<PathBuf>,
    currency: Option<String>,
    import: Option<RawImport>,
}

#[derive(Debug, Deserialize)]
struct RawImport {
    date_format: Option<String>,
    date_column: Option<String>,
    narration_column: Option<String>,
    withdrawal_column: Option<String>,
    deposit_column: Option<String>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(path) = raw.categories_file {
        config.categories_file = path;
    }
    if let Some(currency) = raw.currency {
        config.currency = currency;
    }

    if let Some(import) = raw.import {
        let options = &mut config.import;
        if let Some(format) = import.date_format {
            options.date_format = format;
        }
        if let Some(column) = import.date_column {
            options.date_column = column;
        }
        if let Some(column) = import.narration_column {
            options.narration_column = column;
        }
        if let Some(column) = import.withdrawal_column {
            options.withdrawal_column = column;
        }
        if let Some(column) = import.deposit_column {
            options.deposit_column = column;
        }
    }

    Ok(config)
}

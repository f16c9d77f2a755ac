//! Shared command utilities
//!
//! This module contains:
//! - `load_config` - Resolve the config file and apply the `--categories` override
//! - `open_session` - Open the category store and start a session
//! - `load_file` - Parse and categorize a statement CSV into the session
//! - `parse_view` - Parse a `--view` argument

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{CategoryStore, Config, Session, StatementView};
use tracing::debug;

/// Load config, letting `--categories` replace the configured store path
pub fn load_config(config_path: Option<&Path>, categories: Option<&Path>) -> Result<Config> {
    let mut config = Config::load(config_path).context("Failed to load config")?;
    if let Some(path) = categories {
        config.categories_file = path.to_path_buf();
    }
    debug!("Category store: {}", config.categories_file.display());
    Ok(config)
}

/// Open the category store named by the config
pub fn open_session(config: &Config) -> Result<Session> {
    let store = CategoryStore::load(&config.categories_file).with_context(|| {
        format!(
            "Failed to open category store {}",
            config.categories_file.display()
        )
    })?;
    Ok(Session::open(store))
}

/// Load a statement file into the session
pub fn load_file(session: &mut Session, config: &Config, file: &Path) -> Result<()> {
    let handle =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    session
        .load_statement(BufReader::new(handle), &config.import)
        .with_context(|| format!("Failed to load statement {}", file.display()))
}

pub fn parse_view(view: &str) -> Result<StatementView> {
    view.parse().map_err(|e: String| anyhow::anyhow!(e))
}

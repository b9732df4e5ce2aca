//! Subcommand implementations

pub mod check;
pub mod serve;

use std::path::Path;

use anyhow::{Context, Result};
use pulseboard_server::PulseboardConfig;

/// Load configuration from file and environment
pub fn load_config(path: Option<&Path>) -> Result<PulseboardConfig> {
    let config = PulseboardConfig::load(path).context("Failed to load configuration")?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

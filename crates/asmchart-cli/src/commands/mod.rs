//! CLI command implementations

pub mod generate;
pub mod init;
pub mod inspect;
pub mod validate;

use anyhow::{Context, Result};
use asmchart_core::Config;

/// Load the project configuration, falling back to defaults when absent
pub fn load_config(config_path: &str) -> Result<Config> {
    tracing::debug!("Loading configuration from {}", config_path);
    Config::load_or_default(config_path).context("Failed to load configuration")
}

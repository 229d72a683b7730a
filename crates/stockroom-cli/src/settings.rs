//! Configuration loading for the `stockroom` binary.

use std::path::Path;

use anyhow::{Context, Result};
use stockroom_core::AppConfig;
use stockroom_inventory::InventorySystem;

/// Load the configuration file, or the built-in defaults when no path is
/// given, then apply command-line overrides.
pub fn load_config(path: Option<&Path>, low_stock_threshold: Option<u64>) -> Result<AppConfig> {
    let mut config = match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };

    if let Some(threshold) = low_stock_threshold {
        tracing::debug!(threshold, "Overriding low-stock threshold");
        config.low_stock_threshold = threshold;
    }
    Ok(config)
}

/// Build the inventory system and seed the configured accounts.
pub fn build_system(config: &AppConfig) -> Result<InventorySystem> {
    InventorySystem::from_config(config).context("failed to seed configured accounts")
}

//! CLI command implementations.

pub mod chart;
pub mod prices;
pub mod rates;
pub mod run;
pub mod validate;

use anyhow::{Context, Result};
use pricebot_config::{load_config, AppConfig};
use pricebot_exchange::{BinanceClient, BinanceConfig, NavasanClient, NavasanConfig};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Load and validate the configuration at `path`.
pub(crate) fn load(path: &Path) -> Result<AppConfig> {
    let config = load_config(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

pub(crate) fn binance(config: &AppConfig) -> Result<Arc<BinanceClient>> {
    let client = BinanceClient::new(BinanceConfig {
        base_url: config.binance.base_url.clone(),
        timeout_secs: config.binance.timeout_secs,
    })
    .context("Failed to create Binance client")?;
    Ok(Arc::new(client))
}

/// Fiat client, or `None` when no API key is set.
pub(crate) fn navasan(config: &AppConfig) -> Result<Option<Arc<NavasanClient>>> {
    let Some(api_key) = config.navasan.api_key() else {
        info!(
            "{} is not set, fiat rates are disabled",
            config.navasan.api_key_env
        );
        return Ok(None);
    };

    let mut navasan = NavasanConfig::new(config.navasan.base_url.clone(), api_key);
    navasan.timeout_secs = config.navasan.timeout_secs;
    let client = NavasanClient::new(navasan).context("Failed to create Navasan client")?;
    Ok(Some(Arc::new(client)))
}

//! Bot command implementation.

use anyhow::{Context, Result};
use pricebot_bot::{telegram, PriceBot, PriceBotSettings};
use pricebot_chart::PngChartRenderer;
use pricebot_data::{PriceSnapshotFetcher, SeriesCache};
use std::path::Path;
use std::sync::Arc;
use teloxide::Bot;
use tracing::info;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = super::load(config_path)?;
    let token = config.telegram.token().with_context(|| {
        format!(
            "Telegram token missing, set the {} environment variable",
            config.telegram.token_env
        )
    })?;

    let binance = super::binance(&config)?;
    let fetcher = PriceSnapshotFetcher::new(binance.clone())
        .with_quote_suffix(config.market.quote_suffix.clone())
        .with_top_n(config.market.top_n);
    let settings = PriceBotSettings {
        usdt_to_toman: config.market.usdt_to_toman,
        chart_interval: config.market.chart_interval()?,
        chart_limit: config.market.chart_limit,
    };

    let mut service = PriceBot::new(
        fetcher,
        SeriesCache::new(binance),
        Arc::new(PngChartRenderer::default()),
        settings,
    );
    if let Some(navasan) = super::navasan(&config)? {
        service = service.with_fiat_rates(navasan);
    }

    info!(
        "Starting {} ({}), top {} {} pairs",
        config.app.name, config.app.environment, config.market.top_n, config.market.quote_suffix
    );
    telegram::run(Bot::new(token), Arc::new(service))
        .await
        .context("Telegram dispatcher failed")?;

    Ok(())
}

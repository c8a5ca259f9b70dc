//! Chart command implementation.

use anyhow::{Context, Result};
use pricebot_chart::PngChartRenderer;
use pricebot_core::traits::ChartRenderer;
use pricebot_core::types::Interval;
use pricebot_data::{resolve_all, PriceSnapshotFetcher, SeriesCache};
use std::path::Path;
use tracing::info;

use crate::cli::ChartArgs;

pub async fn run(args: ChartArgs, config_path: &Path) -> Result<()> {
    let config = super::load(config_path)?;
    let binance = super::binance(&config)?;

    let interval = match &args.interval {
        Some(raw) => raw
            .parse::<Interval>()
            .map_err(|e| anyhow::anyhow!("Invalid interval '{}': {}", raw, e))?,
        None => config.market.chart_interval()?,
    };
    let limit = args.limit.unwrap_or(config.market.chart_limit);
    let symbol = PriceSnapshotFetcher::new(binance.clone())
        .with_quote_suffix(config.market.quote_suffix.clone())
        .qualify(&args.symbol);

    let cache = SeriesCache::new(binance);
    let series = cache
        .fetch_and_store(&symbol, interval, limit)
        .await
        .with_context(|| format!("Cannot fetch {}", symbol))?;

    let png = PngChartRenderer::default()
        .render(&series)
        .context("Failed to render chart")?;
    std::fs::write(&args.out, &png)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    info!("Wrote {} bytes to {}", png.len(), args.out.display());

    println!("{} ({} x {})", symbol, series.len(), interval);
    for point in resolve_all(&series) {
        println!(
            "{:<12} {:.6}  {}",
            point.label.to_string(),
            point.close,
            point.timestamp.format("%Y-%m-%d %H:%M UTC")
        );
    }

    Ok(())
}

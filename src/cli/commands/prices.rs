//! Ranked price list command implementation.

use anyhow::Result;
use pricebot_bot::format::{toman, usdt};
use pricebot_core::types::SymbolQuote;
use pricebot_data::PriceSnapshotFetcher;
use rust_decimal::Decimal;
use std::path::Path;

use crate::cli::PricesArgs;

pub async fn run(args: PricesArgs, config_path: &Path) -> Result<()> {
    let config = super::load(config_path)?;
    let fetcher = PriceSnapshotFetcher::new(super::binance(&config)?)
        .with_quote_suffix(config.market.quote_suffix.clone())
        .with_top_n(args.top.unwrap_or(config.market.top_n));

    let quotes = fetcher.top().await;
    if quotes.is_empty() {
        anyhow::bail!("Cannot fetch prices");
    }

    println!("{:<14} {:>24} {:>24}", "Symbol", "Price", "Toman");
    println!("{}", "-".repeat(64));
    for quote in &quotes {
        println!("{}", row(quote, config.market.usdt_to_toman));
    }

    Ok(())
}

fn row(quote: &SymbolQuote, rate: Decimal) -> String {
    format!(
        "{:<14} {:>24} {:>24}",
        quote.symbol,
        usdt(quote.price),
        toman(quote.price, rate)
    )
}

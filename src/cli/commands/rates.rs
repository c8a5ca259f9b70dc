//! Fiat rates command implementation.

use anyhow::{Context, Result};
use pricebot_core::traits::FiatRateProvider;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = super::load(config_path)?;
    let Some(navasan) = super::navasan(&config)? else {
        anyhow::bail!(
            "Fiat rates are not configured, set the {} environment variable",
            config.navasan.api_key_env
        );
    };

    let rates = navasan.rates().await.context("Cannot fetch other currencies")?;

    println!("{:<16} {:>16} {:>12}  {}", "Currency", "Toman", "Change", "Date");
    println!("{}", "-".repeat(60));
    for rate in rates.values() {
        println!(
            "{:<16} {:>16} {:>12}  {}",
            rate.symbol, rate.value, rate.change, rate.date
        );
    }

    Ok(())
}

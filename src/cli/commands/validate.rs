//! Validate configuration command.

use anyhow::Result;
use pricebot_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };
    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Binance: {}", config.binance.base_url);
    println!("Quote suffix: {}", config.market.quote_suffix);
    println!("Top N: {}", config.market.top_n);
    println!("USDT to Toman: {}", config.market.usdt_to_toman);
    println!(
        "Chart: {} x {}",
        config.market.chart_limit, config.market.chart_interval
    );
    println!(
        "Telegram token ({}): {}",
        config.telegram.token_env,
        if config.telegram.token().is_some() { "set" } else { "missing" }
    );
    println!(
        "Fiat rates ({}): {}",
        config.navasan.api_key_env,
        if config.navasan.api_key().is_some() { "enabled" } else { "disabled" }
    );

    Ok(())
}

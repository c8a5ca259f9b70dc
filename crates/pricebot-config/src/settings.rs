//! Configuration structures.

use pricebot_core::types::Interval;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A configuration value outside its allowed range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub telegram: TelegramSettings,
    #[serde(default)]
    pub binance: BinanceSettings,
    #[serde(default)]
    pub navasan: NavasanSettings,
    #[serde(default)]
    pub market: MarketSettings,
}

impl AppConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let market = &self.market;
        if market.top_n == 0 {
            return Err(ValidationError::new("market.top_n", "must be at least 1"));
        }
        if market.quote_suffix.trim().is_empty() {
            return Err(ValidationError::new("market.quote_suffix", "must not be empty"));
        }
        if market.usdt_to_toman <= Decimal::ZERO {
            return Err(ValidationError::new("market.usdt_to_toman", "must be positive"));
        }
        if !(1..=1000).contains(&market.chart_limit) {
            return Err(ValidationError::new(
                "market.chart_limit",
                format!("{} is outside 1..=1000", market.chart_limit),
            ));
        }
        market.chart_interval()?;
        if self.binance.timeout_secs == 0 || self.navasan.timeout_secs == 0 {
            return Err(ValidationError::new("timeout_secs", "must be at least 1"));
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "pricebot".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Telegram bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramSettings {
    /// Environment variable holding the bot token
    pub token_env: String,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            token_env: "TELEGRAM_TOKEN".to_string(),
        }
    }
}

impl TelegramSettings {
    /// Read the bot token from the configured environment variable.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

/// Binance API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinanceSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BinanceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.binance.com".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Navasan API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavasanSettings {
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for NavasanSettings {
    fn default() -> Self {
        Self {
            base_url: "http://api.navasan.tech".to_string(),
            api_key_env: "NAVASAN_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

impl NavasanSettings {
    /// Read the API key; fiat rates are disabled without one.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

/// Ranking, conversion and chart settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSettings {
    pub quote_suffix: String,
    pub top_n: usize,
    pub usdt_to_toman: Decimal,
    pub chart_interval: String,
    pub chart_limit: u16,
}

impl Default for MarketSettings {
    fn default() -> Self {
        use rust_decimal_macros::dec;
        Self {
            quote_suffix: "USDT".to_string(),
            top_n: 20,
            usdt_to_toman: dec!(60000),
            chart_interval: "1h".to_string(),
            chart_limit: 30,
        }
    }
}

impl MarketSettings {
    /// Parsed chart candle interval.
    pub fn chart_interval(&self) -> Result<Interval, ValidationError> {
        Interval::from_str(&self.chart_interval)
            .map_err(|e| ValidationError::new("market.chart_interval", e))
    }
}

//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, BinanceSettings, LoggingConfig, MarketSettings, NavasanSettings,
    TelegramSettings, ValidationError,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from an optional file and the environment.
///
/// Environment variables use the `PRICEBOT__` prefix with `__` between
/// sections, e.g. `PRICEBOT__MARKET__TOP_N=10`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("PRICEBOT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

//! Provider trait definitions.

use crate::error::DataError;
use crate::types::{FiatRate, Interval, RawKline, TickerSnapshot};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Trait for exchange ticker sources.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the 24h ticker for every listed symbol.
    ///
    /// # Returns
    /// Raw ticker rows in provider order
    async fn tickers(&self) -> Result<Vec<TickerSnapshot>, DataError>;

    /// Fetch the latest price of one symbol.
    async fn price(&self, symbol: &str) -> Result<Decimal, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

/// Trait for historical candle sources.
#[async_trait]
pub trait KlineProvider: Send + Sync {
    /// Fetch recent candles.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    /// * `interval` - The candle interval
    /// * `limit` - Number of candles, ending at the current one
    ///
    /// # Returns
    /// Candles as reported, normally ordered from oldest to newest
    async fn klines(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u16,
    ) -> Result<Vec<RawKline>, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

/// Trait for fiat exchange rate sources.
#[async_trait]
pub trait FiatRateProvider: Send + Sync {
    /// Fetch the latest rate of every currency, keyed by provider symbol.
    async fn rates(&self) -> Result<BTreeMap<String, FiatRate>, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

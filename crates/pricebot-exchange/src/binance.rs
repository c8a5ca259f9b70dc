//! Binance spot market data integration.

use async_trait::async_trait;
use pricebot_core::error::{BotError, DataError};
use pricebot_core::traits::{KlineProvider, QuoteProvider};
use pricebot_core::types::{Interval, RawKline, TickerSnapshot};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

use crate::http::{build_client, get_json, scalar_to_string};

/// Binance API configuration.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.binance.com".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Binance API response types
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceTicker24h {
    symbol: String,
    #[serde(default)]
    last_price: Option<Value>,
    #[serde(default)]
    quote_volume: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct BinanceTickerPrice {
    #[allow(dead_code)]
    symbol: String,
    price: String,
}

/// Binance public market data client.
pub struct BinanceClient {
    config: BinanceConfig,
    client: Client,
}

impl BinanceClient {
    /// Create a new Binance client.
    pub fn new(config: BinanceConfig) -> Result<Self, BotError> {
        let client = build_client(config.timeout_secs)?;
        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl QuoteProvider for BinanceClient {
    async fn tickers(&self) -> Result<Vec<TickerSnapshot>, DataError> {
        let url = self.url("/api/v3/ticker/24hr");
        let rows: Vec<BinanceTicker24h> = get_json(&self.client, &url, &[] as &[(&str, &str)]).await?;
        debug!("Received {} tickers", rows.len());
        Ok(rows.into_iter().map(parse_ticker).collect())
    }

    async fn price(&self, symbol: &str) -> Result<Decimal, DataError> {
        let url = self.url("/api/v3/ticker/price");
        let data: BinanceTickerPrice = get_json(&self.client, &url, &[("symbol", symbol)]).await?;
        Decimal::from_str(&data.price)
            .map_err(|e| DataError::unavailable(format!("price {:?}: {}", data.price, e)))
    }

    fn name(&self) -> &str {
        "Binance"
    }
}

#[async_trait]
impl KlineProvider for BinanceClient {
    async fn klines(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u16,
    ) -> Result<Vec<RawKline>, DataError> {
        let url = self.url("/api/v3/klines");
        let limit = limit.to_string();
        let params = [
            ("symbol", symbol),
            ("interval", interval.as_str()),
            ("limit", limit.as_str()),
        ];

        let rows: Vec<Vec<Value>> = get_json(&self.client, &url, &params).await?;
        rows.iter().map(|row| parse_kline(row)).collect()
    }

    fn name(&self) -> &str {
        "Binance"
    }
}

fn parse_ticker(t: BinanceTicker24h) -> TickerSnapshot {
    TickerSnapshot {
        symbol: t.symbol,
        last_price: t.last_price.as_ref().and_then(scalar_to_string),
        quote_volume: t.quote_volume.as_ref().and_then(scalar_to_string),
    }
}

/// Kline rows are positional arrays: `[open_time, open, high, low, close, ...]`.
fn parse_kline(row: &[Value]) -> Result<RawKline, DataError> {
    let open_time_ms = row
        .first()
        .and_then(Value::as_i64)
        .ok_or_else(|| DataError::unavailable(format!("kline without open time: {:?}", row)))?;
    let close = row
        .get(4)
        .and_then(scalar_to_string)
        .ok_or_else(|| DataError::unavailable(format!("kline without close: {:?}", row)))?;

    Ok(RawKline { open_time_ms, close })
}

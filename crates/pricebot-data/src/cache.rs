//! Per-symbol series cache.

use chrono::{DateTime, Utc};
use pricebot_core::error::DataError;
use pricebot_core::traits::KlineProvider;
use pricebot_core::types::{Interval, LookbackLabel, LookbackPoint, RawKline, TimeSeries};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::{lookback, parse_decimal};

/// In-memory cache of the latest fetched series per symbol.
///
/// Entries are replaced whole on every fetch and never evicted.
pub struct SeriesCache {
    provider: Arc<dyn KlineProvider>,
    series: RwLock<HashMap<String, Arc<TimeSeries>>>,
}

impl SeriesCache {
    /// Create an empty cache backed by `provider`.
    pub fn new(provider: Arc<dyn KlineProvider>) -> Self {
        Self {
            provider,
            series: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch `limit` candles for `symbol` and replace any cached series.
    ///
    /// On failure the previous entry, if any, stays untouched.
    pub async fn fetch_and_store(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u16,
    ) -> Result<Arc<TimeSeries>, DataError> {
        let raw = self
            .provider
            .klines(symbol, interval, limit)
            .await
            .map_err(|e| {
                warn!("Kline fetch for {} from {} failed: {}", symbol, self.provider.name(), e);
                e
            })?;

        if raw.is_empty() {
            warn!("Kline fetch for {} returned no candles", symbol);
            return Err(DataError::unavailable(format!("no candles for {}", symbol)));
        }

        let points = raw
            .iter()
            .map(to_point)
            .collect::<Result<Vec<_>, _>>()?;
        let series = Arc::new(TimeSeries::new(symbol, interval, points)?);

        // Swap under the write lock only; no lock is held across the fetch.
        self.series
            .write()
            .await
            .insert(symbol.to_string(), Arc::clone(&series));

        debug!("Cached {} {} candles for {}", series.len(), interval, symbol);
        Ok(series)
    }

    /// Get the cached series for `symbol`.
    pub async fn get(&self, symbol: &str) -> Option<Arc<TimeSeries>> {
        self.series.read().await.get(symbol).cloned()
    }

    /// Resolve a lookback label against the cached series.
    pub async fn lookup(
        &self,
        symbol: &str,
        label: LookbackLabel,
    ) -> Result<LookbackPoint, DataError> {
        let series = self
            .get(symbol)
            .await
            .ok_or_else(|| DataError::NotCached(symbol.to_string()))?;
        Ok(lookback::resolve(&series, label))
    }

    /// Number of cached symbols.
    pub async fn len(&self) -> usize {
        self.series.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.series.read().await.is_empty()
    }
}

fn to_point(kline: &RawKline) -> Result<(DateTime<Utc>, Decimal), DataError> {
    let ts = DateTime::from_timestamp_millis(kline.open_time_ms).ok_or_else(|| {
        DataError::unavailable(format!("invalid open time {}", kline.open_time_ms))
    })?;
    let close = parse_decimal(&kline.close)
        .ok_or_else(|| DataError::unavailable(format!("invalid close price {:?}", kline.close)))?;
    Ok((ts, close))
}

//! Top-N symbol selection.

use pricebot_core::error::DataError;
use pricebot_core::traits::QuoteProvider;
use pricebot_core::types::{SymbolQuote, TickerSnapshot};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::parse_decimal;

/// Quote currency the ranking is restricted to by default.
pub const DEFAULT_QUOTE_SUFFIX: &str = "USDT";

/// Number of symbols returned by default.
pub const DEFAULT_TOP_N: usize = 20;

/// Filter, rank and truncate raw ticker rows.
///
/// Rows whose symbol does not end in `suffix` are dropped. A missing or
/// unparseable volume ranks as zero; a row without a parseable price is
/// dropped. Equal volumes keep provider order.
pub fn rank_by_volume(rows: Vec<TickerSnapshot>, suffix: &str, k: usize) -> Vec<SymbolQuote> {
    let mut quotes: Vec<SymbolQuote> = rows
        .into_iter()
        .filter(|row| row.symbol.ends_with(suffix))
        .filter_map(|row| {
            let Some(price) = row.last_price.as_deref().and_then(parse_decimal) else {
                debug!("Skipping {}: unparseable price {:?}", row.symbol, row.last_price);
                return None;
            };
            let volume = row
                .quote_volume
                .as_deref()
                .and_then(parse_decimal)
                .unwrap_or(Decimal::ZERO);

            Some(SymbolQuote {
                symbol: row.symbol,
                price,
                volume,
            })
        })
        .collect();

    quotes.sort_by(|a, b| b.volume.cmp(&a.volume));
    quotes.truncate(k);
    quotes
}

/// Produces the ranked price list from a quote provider.
pub struct PriceSnapshotFetcher {
    provider: Arc<dyn QuoteProvider>,
    quote_suffix: String,
    top_n: usize,
}

impl PriceSnapshotFetcher {
    /// Create a fetcher with the default suffix and list size.
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self {
            provider,
            quote_suffix: DEFAULT_QUOTE_SUFFIX.to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_quote_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.quote_suffix = suffix.into();
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn quote_suffix(&self) -> &str {
        &self.quote_suffix
    }

    /// Upper-case a user-typed symbol and append the quote suffix if missing.
    pub fn qualify(&self, raw: &str) -> String {
        let symbol = raw.trim().to_ascii_uppercase();
        if symbol.ends_with(&self.quote_suffix) {
            symbol
        } else {
            format!("{}{}", symbol, self.quote_suffix)
        }
    }

    /// Fetch the top symbols by quote volume.
    ///
    /// An empty result means the provider was unavailable. Callers surface
    /// that to the user; nothing here retries.
    pub async fn top(&self) -> Vec<SymbolQuote> {
        match self.provider.tickers().await {
            Ok(rows) => {
                let total = rows.len();
                let quotes = rank_by_volume(rows, &self.quote_suffix, self.top_n);
                info!(
                    "Ranked {} of {} tickers from {}",
                    quotes.len(),
                    total,
                    self.provider.name()
                );
                quotes
            }
            Err(e) => {
                warn!("Ticker fetch from {} failed: {}", self.provider.name(), e);
                Vec::new()
            }
        }
    }

    /// Fetch the latest price of a single symbol.
    pub async fn price_of(&self, symbol: &str) -> Result<Decimal, DataError> {
        self.provider.price(symbol).await.map_err(|e| {
            warn!("Price fetch for {} failed: {}", symbol, e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    struct FixedTickers(Result<Vec<TickerSnapshot>, DataError>);

    #[async_trait]
    impl QuoteProvider for FixedTickers {
        async fn tickers(&self) -> Result<Vec<TickerSnapshot>, DataError> {
            self.0.clone()
        }

        async fn price(&self, symbol: &str) -> Result<Decimal, DataError> {
            match symbol {
                "BTCUSDT" => Ok(dec!(65000.5)),
                _ => Err(DataError::unavailable("unknown symbol")),
            }
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn usdt_rows(n: usize) -> Vec<TickerSnapshot> {
        (0..n)
            .map(|i| {
                let volume = ((i * 37) % 101).to_string();
                TickerSnapshot::new(format!("C{}USDT", i), Some("1.5"), Some(volume.as_str()))
            })
            .collect()
    }

    #[test]
    fn test_returns_top_twenty_by_volume() {
        let mut rows = usdt_rows(45);
        rows.push(TickerSnapshot::new("ETHBTC", Some("0.05"), Some("999999")));
        rows.push(TickerSnapshot::new("BNBBUSD", Some("300"), Some("999999")));

        let quotes = rank_by_volume(rows, "USDT", 20);

        assert_eq!(quotes.len(), 20);
        assert!(quotes.iter().all(|q| q.symbol.ends_with("USDT")));
        assert!(quotes.windows(2).all(|w| w[0].volume >= w[1].volume));
    }

    #[test]
    fn test_qualify_appends_suffix() {
        let fetcher = PriceSnapshotFetcher::new(Arc::new(FixedTickers(Ok(Vec::new()))));
        assert_eq!(fetcher.qualify("btc"), "BTCUSDT");
        assert_eq!(fetcher.qualify(" ethusdt "), "ETHUSDT");

        let fetcher = fetcher.with_quote_suffix("BUSD");
        assert_eq!(fetcher.qualify("sol"), "SOLBUSD");
    }

    #[test]
    fn test_short_list_is_returned_whole() {
        let quotes = rank_by_volume(usdt_rows(3), "USDT", 20);
        assert_eq!(quotes.len(), 3);
    }

    #[test]
    fn test_bad_volume_sorts_as_zero() {
        let rows = vec![
            TickerSnapshot::new("AUSDT", Some("1"), None),
            TickerSnapshot::new("BUSDT", Some("2"), Some("not-a-number")),
            TickerSnapshot::new("CUSDT", Some("3"), Some("10")),
            TickerSnapshot::new("DUSDT", Some("4"), Some("5")),
        ];

        let quotes = rank_by_volume(rows, "USDT", 20);
        let symbols: Vec<&str> = quotes.iter().map(|q| q.symbol.as_str()).collect();

        assert_eq!(symbols, vec!["CUSDT", "DUSDT", "AUSDT", "BUSDT"]);
        assert_eq!(quotes[2].volume, Decimal::ZERO);
        assert_eq!(quotes[3].volume, Decimal::ZERO);
    }

    #[test]
    fn test_unparseable_price_is_skipped() {
        let rows = vec![
            TickerSnapshot::new("AUSDT", None, Some("10")),
            TickerSnapshot::new("BUSDT", Some("2.25"), Some("1")),
        ];

        let quotes = rank_by_volume(rows, "USDT", 20);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].price, dec!(2.25));
    }

    #[tokio::test]
    async fn test_provider_failure_yields_empty_list() {
        let fetcher = PriceSnapshotFetcher::new(Arc::new(FixedTickers(Err(
            DataError::unavailable("HTTP 500"),
        ))));

        assert!(fetcher.top().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetcher_applies_suffix_and_size() {
        let mut rows = usdt_rows(10);
        rows.push(TickerSnapshot::new("ETHBTC", Some("0.05"), Some("1000")));
        let fetcher = PriceSnapshotFetcher::new(Arc::new(FixedTickers(Ok(rows))))
            .with_quote_suffix("BTC")
            .with_top_n(5);

        let quotes = fetcher.top().await;
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].symbol, "ETHBTC");
    }

    #[tokio::test]
    async fn test_price_of() {
        let fetcher = PriceSnapshotFetcher::new(Arc::new(FixedTickers(Ok(vec![]))));

        assert_eq!(fetcher.price_of("BTCUSDT").await.unwrap(), dec!(65000.5));
        assert!(fetcher.price_of("NOPEUSDT").await.is_err());
    }
}

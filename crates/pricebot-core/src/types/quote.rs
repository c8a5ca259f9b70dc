//! Quote and raw provider row types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A ranked price snapshot for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolQuote {
    /// Exchange symbol, e.g. `BTCUSDT`
    pub symbol: String,
    /// Last traded price in the quote currency
    pub price: Decimal,
    /// 24h volume in the quote currency
    pub volume: Decimal,
}

/// One 24h ticker row exactly as the quote provider reported it.
///
/// Numeric fields stay unparsed so that ranking decides how to treat
/// missing or malformed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerSnapshot {
    pub symbol: String,
    pub last_price: Option<String>,
    pub quote_volume: Option<String>,
}

impl TickerSnapshot {
    pub fn new(
        symbol: impl Into<String>,
        last_price: Option<&str>,
        quote_volume: Option<&str>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            last_price: last_price.map(str::to_string),
            quote_volume: quote_volume.map(str::to_string),
        }
    }
}

/// One kline row as the kline provider reported it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKline {
    /// Candle open time (Unix milliseconds)
    pub open_time_ms: i64,
    /// Closing price, still in its string form
    pub close: String,
}

impl RawKline {
    pub fn new(open_time_ms: i64, close: impl Into<String>) -> Self {
        Self {
            open_time_ms,
            close: close.into(),
        }
    }
}

//! Price ranking, series caching and lookback resolution.

mod cache;
mod lookback;
mod ranking;

pub use cache::SeriesCache;
pub use lookback::{resolve, resolve_all};
pub use ranking::{rank_by_volume, PriceSnapshotFetcher, DEFAULT_QUOTE_SUFFIX, DEFAULT_TOP_N};

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a provider number, accepting plain and scientific notation.
pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

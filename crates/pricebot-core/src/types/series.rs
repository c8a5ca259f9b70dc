//! Close-price time series.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Interval;
use crate::error::DataError;

/// Close prices for one symbol, oldest first.
///
/// A series is never empty, `timestamps` and `closes` always have the same
/// length, and timestamps are non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesFields")]
pub struct TimeSeries {
    /// Symbol identifier
    pub symbol: String,
    /// Sampling interval of the candles
    pub interval: Interval,
    timestamps: Vec<DateTime<Utc>>,
    closes: Vec<Decimal>,
}

/// Wire shape of a series, checked through [`TimeSeries::new`].
#[derive(Deserialize)]
struct SeriesFields {
    symbol: String,
    interval: Interval,
    timestamps: Vec<DateTime<Utc>>,
    closes: Vec<Decimal>,
}

impl TryFrom<SeriesFields> for TimeSeries {
    type Error = DataError;

    fn try_from(fields: SeriesFields) -> Result<Self, Self::Error> {
        if fields.timestamps.len() != fields.closes.len() {
            return Err(DataError::InvalidSeries(format!(
                "{} has {} timestamps and {} closes",
                fields.symbol,
                fields.timestamps.len(),
                fields.closes.len()
            )));
        }
        let points = fields.timestamps.into_iter().zip(fields.closes).collect();
        TimeSeries::new(fields.symbol, fields.interval, points)
    }
}

impl TimeSeries {
    /// Build a series from `(timestamp, close)` points.
    ///
    /// Points are ordered by timestamp; ties keep their input order.
    pub fn new(
        symbol: impl Into<String>,
        interval: Interval,
        mut points: Vec<(DateTime<Utc>, Decimal)>,
    ) -> Result<Self, DataError> {
        let symbol = symbol.into();
        if points.is_empty() {
            return Err(DataError::InvalidSeries(format!("{} has no points", symbol)));
        }

        points.sort_by_key(|(ts, _)| *ts);
        let (timestamps, closes) = points.into_iter().unzip();

        Ok(Self {
            symbol,
            interval,
            timestamps,
            closes,
        })
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn closes(&self) -> &[Decimal] {
        &self.closes
    }

    /// Get a point by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<(DateTime<Utc>, Decimal)> {
        Some((*self.timestamps.get(index)?, *self.closes.get(index)?))
    }

    /// Get the newest point.
    pub fn last(&self) -> (DateTime<Utc>, Decimal) {
        let idx = self.len() - 1;
        (self.timestamps[idx], self.closes[idx])
    }

    /// Lowest and highest close.
    pub fn close_range(&self) -> (Decimal, Decimal) {
        let min = self.closes.iter().copied().min().unwrap_or_default();
        let max = self.closes.iter().copied().max().unwrap_or_default();
        (min, max)
    }

    /// Iterate over `(timestamp, close)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, Decimal)> + '_ {
        self.timestamps.iter().copied().zip(self.closes.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ts(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn test_empty_series_rejected() {
        let result = TimeSeries::new("BTCUSDT", Interval::Hour1, vec![]);
        assert!(matches!(result, Err(DataError::InvalidSeries(_))));
    }

    #[test]
    fn test_deserialize_checks_invariants() {
        let empty = r#"{"symbol":"BTCUSDT","interval":"1h","timestamps":[],"closes":[]}"#;
        assert!(serde_json::from_str::<TimeSeries>(empty).is_err());

        let ragged = r#"{"symbol":"BTCUSDT","interval":"1h",
            "timestamps":["2023-11-14T22:00:00Z"],"closes":["1","2"]}"#;
        assert!(serde_json::from_str::<TimeSeries>(ragged).is_err());

        let unsorted = r#"{"symbol":"BTCUSDT","interval":"1h",
            "timestamps":["2023-11-14T23:00:00Z","2023-11-14T22:00:00Z"],"closes":["2","1"]}"#;
        let series: TimeSeries = serde_json::from_str(unsorted).unwrap();
        assert_eq!(series.closes(), &[dec!(1), dec!(2)]);
    }

    #[test]
    fn test_points_are_ordered_by_time() {
        let series = TimeSeries::new(
            "BTCUSDT",
            Interval::Hour1,
            vec![(ts(3000), dec!(3)), (ts(1000), dec!(1)), (ts(2000), dec!(2))],
        )
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), &[dec!(1), dec!(2), dec!(3)]);
        assert!(series.timestamps().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(series.last(), (ts(3000), dec!(3)));
    }

    #[test]
    fn test_close_range() {
        let series = TimeSeries::new(
            "ETHUSDT",
            Interval::Hour1,
            vec![(ts(1), dec!(10.5)), (ts(2), dec!(9.25)), (ts(3), dec!(12))],
        )
        .unwrap();

        assert_eq!(series.close_range(), (dec!(9.25), dec!(12)));
        assert_eq!(series.get(1), Some((ts(2), dec!(9.25))));
        assert_eq!(series.get(3), None);
    }
}

//! Candle interval definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kline interval, as accepted by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    /// 1 minute candles
    #[serde(rename = "1m")]
    Minute1,
    /// 3 minute candles
    #[serde(rename = "3m")]
    Minute3,
    /// 5 minute candles
    #[serde(rename = "5m")]
    Minute5,
    /// 15 minute candles
    #[serde(rename = "15m")]
    Minute15,
    /// 30 minute candles
    #[serde(rename = "30m")]
    Minute30,
    /// 1 hour candles
    #[serde(rename = "1h")]
    #[default]
    Hour1,
    /// 2 hour candles
    #[serde(rename = "2h")]
    Hour2,
    /// 4 hour candles
    #[serde(rename = "4h")]
    Hour4,
    /// 6 hour candles
    #[serde(rename = "6h")]
    Hour6,
    /// 8 hour candles
    #[serde(rename = "8h")]
    Hour8,
    /// 12 hour candles
    #[serde(rename = "12h")]
    Hour12,
    /// Daily candles
    #[serde(rename = "1d")]
    Day1,
    /// 3 day candles
    #[serde(rename = "3d")]
    Day3,
    /// Weekly candles
    #[serde(rename = "1w")]
    Week1,
    /// Monthly candles
    #[serde(rename = "1M")]
    Month1,
}

impl Interval {
    /// Get the duration of the interval in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Interval::Minute1 => 60,
            Interval::Minute3 => 180,
            Interval::Minute5 => 300,
            Interval::Minute15 => 900,
            Interval::Minute30 => 1800,
            Interval::Hour1 => 3600,
            Interval::Hour2 => 7200,
            Interval::Hour4 => 14400,
            Interval::Hour6 => 21600,
            Interval::Hour8 => 28800,
            Interval::Hour12 => 43200,
            Interval::Day1 => 86400,
            Interval::Day3 => 259200,
            Interval::Week1 => 604800,
            Interval::Month1 => 2592000, // Approximate (30 days)
        }
    }

    /// The exchange's wire name for this interval.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1m",
            Interval::Minute3 => "3m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Hour1 => "1h",
            Interval::Hour2 => "2h",
            Interval::Hour4 => "4h",
            Interval::Hour6 => "6h",
            Interval::Hour8 => "8h",
            Interval::Hour12 => "12h",
            Interval::Day1 => "1d",
            Interval::Day3 => "3d",
            Interval::Week1 => "1w",
            Interval::Month1 => "1M",
        }
    }

    /// Get all available intervals.
    pub fn all() -> &'static [Interval] {
        &[
            Interval::Minute1,
            Interval::Minute3,
            Interval::Minute5,
            Interval::Minute15,
            Interval::Minute30,
            Interval::Hour1,
            Interval::Hour2,
            Interval::Hour4,
            Interval::Hour6,
            Interval::Hour8,
            Interval::Hour12,
            Interval::Day1,
            Interval::Day3,
            Interval::Week1,
            Interval::Month1,
        ]
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "1M" is a month and "1m" a minute, so the exact wire name wins
        // before any case folding.
        if let Some(interval) = Interval::all().iter().find(|i| i.as_str() == s) {
            return Ok(*interval);
        }
        match s.to_lowercase().as_str() {
            "1min" | "minute" => Ok(Interval::Minute1),
            "1hour" | "hour" | "hourly" => Ok(Interval::Hour1),
            "day" | "daily" => Ok(Interval::Day1),
            "week" | "weekly" => Ok(Interval::Week1),
            "month" | "monthly" => Ok(Interval::Month1),
            _ => Err(format!("Invalid interval: {}", s)),
        }
    }
}

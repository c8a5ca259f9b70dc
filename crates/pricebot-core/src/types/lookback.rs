//! Relative lookback labels.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Interval;

/// A human-facing relative time reference into a candle series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookbackLabel {
    Current,
    Yesterday,
    LastWeek,
    LastMonth,
}

impl LookbackLabel {
    /// All labels, newest first.
    pub const ALL: [LookbackLabel; 4] = [
        LookbackLabel::Current,
        LookbackLabel::Yesterday,
        LookbackLabel::LastWeek,
        LookbackLabel::LastMonth,
    ];

    /// Fixed offset in periods, assuming hourly candles.
    pub fn hourly_offset(&self) -> i64 {
        match self {
            LookbackLabel::Current => 0,
            LookbackLabel::Yesterday => -24,
            LookbackLabel::LastWeek => -168,
            LookbackLabel::LastMonth => -720,
        }
    }

    /// Wall-clock distance this label looks back, in seconds.
    pub fn lookback_secs(&self) -> u64 {
        match self {
            LookbackLabel::Current => 0,
            LookbackLabel::Yesterday => 86_400,
            LookbackLabel::LastWeek => 604_800,
            LookbackLabel::LastMonth => 2_592_000,
        }
    }

    /// Offset in periods for a series sampled at `interval`.
    ///
    /// Equals [`hourly_offset`](Self::hourly_offset) for `1h` candles.
    pub fn offset_for(&self, interval: Interval) -> i64 {
        let periods = self.lookback_secs() / interval.as_secs();
        -(periods as i64)
    }

    /// Short stable token used inside callback data.
    pub fn token(&self) -> &'static str {
        match self {
            LookbackLabel::Current => "now",
            LookbackLabel::Yesterday => "1d",
            LookbackLabel::LastWeek => "1w",
            LookbackLabel::LastMonth => "1mo",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.token() == token)
    }

    /// Label shown to users.
    pub fn display_name(&self) -> &'static str {
        match self {
            LookbackLabel::Current => "Current",
            LookbackLabel::Yesterday => "Yesterday",
            LookbackLabel::LastWeek => "Last week",
            LookbackLabel::LastMonth => "Last month",
        }
    }
}

impl fmt::Display for LookbackLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A resolved point in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackPoint {
    pub label: LookbackLabel,
    /// Index into the series (0 = oldest)
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub close: Decimal,
}

//! Lookback resolution against a cached series.

use pricebot_core::types::{LookbackLabel, LookbackPoint, TimeSeries};

/// Resolve a lookback label to a concrete point of `series`.
///
/// A zero offset is the newest point. A negative offset counts back from the
/// series length (`len + offset`) and is clamped into the series, so a
/// series shorter than the lookback window answers with its oldest point.
pub fn resolve(series: &TimeSeries, label: LookbackLabel) -> LookbackPoint {
    let last = series.len().saturating_sub(1);
    let index = match label.offset_for(series.interval) {
        0 => last,
        offset => (series.len() as i64 + offset).clamp(0, last as i64) as usize,
    };

    LookbackPoint {
        label,
        index,
        timestamp: series.timestamps()[index],
        close: series.closes()[index],
    }
}

/// Resolve every label, newest first.
pub fn resolve_all(series: &TimeSeries) -> [LookbackPoint; 4] {
    LookbackLabel::ALL.map(|label| resolve(series, label))
}

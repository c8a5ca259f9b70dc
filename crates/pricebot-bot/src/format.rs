//! Message and button text.

use chrono::{DateTime, Utc};
use pricebot_core::types::{FiatRate, LookbackPoint};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub(crate) const HELP: &str = "/prices - top 20 coins by volume\n\
/chart - chart of a random top coin (or /chart SYMBOL)\n\
/other - other currencies";

/// Group an integer's digits in thousands: `1234567` -> `1,234,567`.
pub fn thousands(value: i128) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Toman equivalent of a USDT amount, truncated to whole Toman.
pub fn toman(usdt: Decimal, rate: Decimal) -> String {
    let whole = (usdt * rate).trunc().to_i128().unwrap_or_default();
    thousands(whole)
}

/// Price in USDT to six decimals.
pub fn usdt(price: Decimal) -> String {
    format!("{:.6} USDT", price)
}

fn timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

pub(crate) fn price_detail(symbol: &str, price: Decimal, rate: Decimal) -> String {
    format!(
        "{}\nPrice: {}\n≈ {} Toman",
        symbol,
        usdt(price),
        toman(price, rate)
    )
}

pub(crate) fn lookback_button(point: &LookbackPoint) -> String {
    format!("{}: {}", point.label, usdt(point.close))
}

pub(crate) fn lookback_detail(symbol: &str, point: &LookbackPoint, rate: Decimal) -> String {
    format!(
        "{} - {}\nPrice: {} ≈ {} Toman\nTime: {}",
        symbol,
        point.label,
        usdt(point.close),
        toman(point.close, rate),
        timestamp(point.timestamp)
    )
}

pub(crate) fn fiat_detail(rate: &FiatRate) -> String {
    format!(
        "{}\nPrice: {} Toman\nChange since yesterday: {}\nDate: {}",
        rate.symbol, rate.value, rate.change, rate.date
    )
}

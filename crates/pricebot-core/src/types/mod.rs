//! Core data types for the price bot.

mod fiat;
mod interval;
mod lookback;
mod quote;
mod series;

pub use fiat::FiatRate;
pub use interval::Interval;
pub use lookback::{LookbackLabel, LookbackPoint};
pub use quote::{RawKline, SymbolQuote, TickerSnapshot};
pub use series::TimeSeries;

//! Core types and traits for the price bot.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (SymbolQuote, TimeSeries, FiatRate)
//! - Lookback labels and candle intervals
//! - Core traits for quote, kline and fiat-rate providers and chart renderers

pub mod types;
pub mod traits;
pub mod error;

pub use error::{BotError, BotResult, ChartError, DataError};
pub use types::*;
pub use traits::*;

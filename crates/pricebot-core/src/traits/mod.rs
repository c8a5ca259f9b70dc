//! Core traits for the price bot.

mod chart;
mod provider;

pub use chart::ChartRenderer;
pub use provider::{FiatRateProvider, KlineProvider, QuoteProvider};

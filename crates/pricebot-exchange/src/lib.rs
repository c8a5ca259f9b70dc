//! Exchange and fiat-rate integrations.

mod binance;
mod http;
mod navasan;

pub use binance::{BinanceClient, BinanceConfig};
pub use navasan::{NavasanClient, NavasanConfig};

//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pricebot")]
#[command(author, version, about = "Telegram bot for crypto and fiat prices")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Telegram bot
    Run,
    /// Print the top coins by quote volume
    Prices(PricesArgs),
    /// Fetch a series, render it to a PNG file and print its lookback points
    Chart(ChartArgs),
    /// Print fiat rates
    Rates,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct PricesArgs {
    /// Number of symbols to show (defaults to market.top_n)
    #[arg(short = 'n', long)]
    pub top: Option<usize>,
}

#[derive(clap::Args)]
pub struct ChartArgs {
    /// Symbol to chart, e.g. BTCUSDT or BTC
    #[arg(short, long)]
    pub symbol: String,

    /// Candle interval (defaults to market.chart_interval)
    #[arg(short, long)]
    pub interval: Option<String>,

    /// Number of candles (defaults to market.chart_limit)
    #[arg(long)]
    pub limit: Option<u16>,

    /// Output PNG file
    #[arg(short, long, default_value = "chart.png")]
    pub out: PathBuf,
}

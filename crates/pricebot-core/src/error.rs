//! Error types for the price bot.

use thiserror::Error;

/// Top-level bot error.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Data source errors.
///
/// Provider failures are not distinguished further: a network error, a
/// timeout, a non-success status and a malformed payload all surface as
/// `ProviderUnavailable`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("No cached series for {0}")]
    NotCached(String),

    #[error("Invalid series: {0}")]
    InvalidSeries(String),
}

impl DataError {
    /// Shorthand for a provider failure.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        DataError::ProviderUnavailable(reason.into())
    }
}

/// Chart rendering errors.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Cannot chart an empty series")]
    EmptySeries,

    #[error("Render error: {0}")]
    Render(String),

    #[error("Encode error: {0}")]
    Encode(String),
}

/// Result type alias for bot operations.
pub type BotResult<T> = Result<T, BotError>;

//! Chart renderer trait definition.

use crate::error::ChartError;
use crate::types::TimeSeries;

/// Turns a series into an encoded image.
pub trait ChartRenderer: Send + Sync {
    /// Render the series.
    ///
    /// # Returns
    /// The encoded image bytes, ready to upload
    fn render(&self, series: &TimeSeries) -> Result<Vec<u8>, ChartError>;
}

//! Line chart rendering into PNG bytes.

use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use pricebot_core::error::ChartError;
use pricebot_core::traits::ChartRenderer;
use pricebot_core::types::TimeSeries;
use rust_decimal::prelude::ToPrimitive;
use std::fmt::Display;
use std::io::Cursor;
use tracing::debug;

const GRID_LINES: usize = 4;
const GRID_COLOR: RGBColor = RGBColor(225, 225, 225);
const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Draws close prices over time as a single line.
///
/// The symbol and prices travel in the message caption and buttons, so the
/// image itself carries no text.
#[derive(Debug, Clone)]
pub struct PngChartRenderer {
    width: u32,
    height: u32,
    margin: u32,
}

impl Default for PngChartRenderer {
    fn default() -> Self {
        Self::new(600, 400)
    }
}

impl PngChartRenderer {
    /// Create a renderer producing `width` x `height` images.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            margin: 20,
        }
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    fn draw(&self, series: &TimeSeries, buffer: &mut [u8]) -> Result<(), ChartError> {
        let root = BitMapBackend::with_buffer(buffer, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let points: Vec<(f64, f64)> = series
            .iter()
            .map(|(ts, close)| (ts.timestamp() as f64, close.to_f64().unwrap_or(0.0)))
            .collect();

        let (x_min, x_max) = padded_range(points.iter().map(|p| p.0));
        let (y_min, y_max) = padded_range(points.iter().map(|p| p.1));

        let mut chart = ChartBuilder::on(&root)
            .margin(self.margin)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(render_err)?;

        let step = (y_max - y_min) / GRID_LINES as f64;
        for i in 0..=GRID_LINES {
            let y = y_min + step * i as f64;
            chart
                .draw_series(LineSeries::new(vec![(x_min, y), (x_max, y)], GRID_COLOR))
                .map_err(render_err)?;
        }

        chart
            .draw_series(LineSeries::new(points, LINE_COLOR.stroke_width(2)))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }
}

impl ChartRenderer for PngChartRenderer {
    fn render(&self, series: &TimeSeries) -> Result<Vec<u8>, ChartError> {
        if series.is_empty() {
            return Err(ChartError::EmptySeries);
        }

        let mut buffer = vec![0u8; self.width as usize * self.height as usize * 3];
        self.draw(series, &mut buffer)?;

        let image = RgbImage::from_raw(self.width, self.height, buffer)
            .ok_or_else(|| ChartError::Encode("pixel buffer size mismatch".into()))?;
        let mut out = Cursor::new(Vec::new());
        image
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| ChartError::Encode(e.to_string()))?;

        let bytes = out.into_inner();
        debug!("Rendered {} chart: {} points, {} bytes", series.symbol, series.len(), bytes.len());
        Ok(bytes)
    }
}

fn render_err(e: impl Display) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Min/max of the values with 5% headroom; a flat range is widened by one.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use pricebot_core::types::Interval;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn series(closes: &[Decimal]) -> TimeSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, c)| (DateTime::from_timestamp(i as i64 * 3600, 0).unwrap(), *c))
            .collect();
        TimeSeries::new("BTCUSDT", Interval::Hour1, points).unwrap()
    }

    #[test]
    fn test_renders_png() {
        let renderer = PngChartRenderer::new(320, 200);
        let bytes = renderer
            .render(&series(&[dec!(100), dec!(101.5), dec!(99.25), dec!(104)]))
            .unwrap();

        assert!(bytes.len() > PNG_MAGIC.len());
        assert_eq!(&bytes[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_single_point_renders() {
        let renderer = PngChartRenderer::default();
        let bytes = renderer.render(&series(&[dec!(42)])).unwrap();
        assert_eq!(&bytes[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range([5.0, 5.0].into_iter()), (4.0, 6.0));
        let (lo, hi) = padded_range([0.0, 100.0].into_iter());
        assert!((lo + 5.0).abs() < 1e-9);
        assert!((hi - 105.0).abs() < 1e-9);
        assert_eq!(padded_range(std::iter::empty()), (0.0, 1.0));
    }
}

//! Price chart rendering.

mod png;

pub use png::PngChartRenderer;

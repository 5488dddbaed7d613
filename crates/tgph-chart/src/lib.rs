// File: crates/tgph-chart/src/lib.rs
// Summary: Library entry point; exports the downsampler, scales, chart engine and probe types.

pub mod chart;
pub mod downsample;
pub mod probe;
pub mod scale;
pub mod surface;

pub use chart::{Chart, ChartError, ChartFrame, ChartSpec, Polyline, Ruler, RULER_COUNT};
pub use downsample::{compress, CompressedSeries};
pub use probe::{HoverReadout, ProbeMode, SeriesSample};
pub use scale::{ScaleDomain, VerticalScale, VERTICAL_PADDING};
pub use surface::DrawSurface;

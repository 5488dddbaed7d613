// File: crates/tgph-chart/src/surface.rs
// Summary: Abstract drawing surface the engine renders into; backends implement this seam.

use crate::chart::ChartFrame;
use crate::probe::HoverReadout;

/// Capability the chart engine draws against. The engine never touches
/// a concrete renderer: a backend reports its pixel size, accepts a
/// laid-out frame, and optionally a probe overlay for the tooltip.
pub trait DrawSurface {
    /// Current pixel size as `(width, height)`.
    fn size(&self) -> (f64, f64);

    /// Replace the surface contents with this frame's polylines and
    /// rulers.
    fn draw_frame(&mut self, frame: &ChartFrame);

    /// Overlay the hover marker and tooltip payload. Backends without
    /// interactivity can ignore it.
    fn draw_probe(&mut self, _readout: &HoverReadout) {}
}

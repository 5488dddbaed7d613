// File: crates/tgph-chart/src/chart.rs
// Summary: Chart engine: validated spec over store-owned containers, resize-driven frame
//          layout, ruler captions, and hover probing over the compressed state.

use chrono::DateTime;
use thiserror::Error;
use tracing::debug;

use tgph_format::Container;

use crate::downsample::{compress, CompressedSeries};
use crate::probe::{lerp, nearest_index, HoverReadout, ProbeMode, SeriesSample};
use crate::scale::{ScaleDomain, VerticalScale};
use crate::surface::DrawSurface;

/// Number of horizontal reference lines drawn across the padded height.
pub const RULER_COUNT: usize = 5;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("series {name:?} has {found} elements but the time axis has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("container {0:?} holds strings and cannot be charted")]
    NonNumeric(String),
}

/// Which containers feed one chart panel. Holds non-owning references
/// into the store; validated once at construction, never per draw.
pub struct ChartSpec<'a> {
    pub title: String,
    pub series: Vec<&'a Container>,
    pub time: &'a Container,
}

impl<'a> ChartSpec<'a> {
    /// Every series must be numeric and exactly as long as the time
    /// axis. A mismatch is an error here, not a silent truncation later.
    pub fn new(
        title: impl Into<String>,
        series: Vec<&'a Container>,
        time: &'a Container,
    ) -> Result<Self, ChartError> {
        if !time.is_numeric() {
            return Err(ChartError::NonNumeric(time.name.clone()));
        }
        for container in &series {
            if !container.is_numeric() {
                return Err(ChartError::NonNumeric(container.name.clone()));
            }
            if container.len() != time.len() {
                return Err(ChartError::LengthMismatch {
                    name: container.name.clone(),
                    expected: time.len(),
                    found: container.len(),
                });
            }
        }
        Ok(Self { title: title.into(), series, time })
    }
}

/// One polyline of screen-space points, ready for an external renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// A horizontal reference line and the domain value it sits on.
#[derive(Clone, Debug, PartialEq)]
pub struct Ruler {
    pub y: f64,
    pub value: f64,
    pub caption: String,
}

/// Everything an external surface needs to draw one chart at one size.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartFrame {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub polylines: Vec<Polyline>,
    pub rulers: Vec<Ruler>,
}

/// Derived per-size state. Rebuilt wholesale on every resize so a
/// pending previous resize can never leave stale partial state behind.
struct Layout {
    compressed: Vec<CompressedSeries>,
    scale: VerticalScale,
    horizontal_scaling: f64,
    frame: ChartFrame,
}

/// A chart panel: N series sharing one time axis and one vertical scale.
pub struct Chart<'a> {
    spec: ChartSpec<'a>,
    layout: Option<Layout>,
}

impl<'a> Chart<'a> {
    pub fn new(spec: ChartSpec<'a>) -> Self {
        Self { spec, layout: None }
    }

    pub fn title(&self) -> &str {
        &self.spec.title
    }

    /// Current drawable frame, if the chart has been sized at least once.
    pub fn frame(&self) -> Option<&ChartFrame> {
        self.layout.as_ref().map(|l| &l.frame)
    }

    /// Recompute all derived state for a new surface size and lay out
    /// the drawable frame: compressed series, joint domain, vertical
    /// scale, horizontal scaling, point sequences and rulers.
    pub fn resize(&mut self, width: f64, height: f64) -> &ChartFrame {
        let target_width = width.max(0.0) as usize;
        let compressed: Vec<CompressedSeries> = self
            .spec
            .series
            .iter()
            .map(|c| compress(&c.elements.as_f64().unwrap_or_default(), target_width))
            .collect();

        let domain = ScaleDomain::over(compressed.iter().map(|c| c.values.as_slice()));
        let scale = VerticalScale::new(height, domain);

        let point_count = compressed.iter().map(|c| c.len()).max().unwrap_or(0);
        let horizontal_scaling = if point_count > 0 { width / point_count as f64 } else { 0.0 };

        let polylines = self
            .spec
            .series
            .iter()
            .zip(&compressed)
            .map(|(container, comp)| Polyline {
                name: container.name.clone(),
                points: comp
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| (i as f64 * horizontal_scaling, scale.to_px(v)))
                    .collect(),
            })
            .collect();

        let rulers = layout_rulers(&scale);

        debug!(
            title = %self.spec.title,
            width,
            height,
            points = point_count,
            "resized chart"
        );

        let frame = ChartFrame {
            title: self.spec.title.clone(),
            width,
            height,
            polylines,
            rulers,
        };
        let layout = self.layout.insert(Layout { compressed, scale, horizontal_scaling, frame });
        &layout.frame
    }

    /// Query the surface for its size, relayout, and hand it the frame.
    pub fn redraw(&mut self, surface: &mut dyn DrawSurface) {
        let (width, height) = surface.size();
        self.resize(width, height);
        if let Some(layout) = &self.layout {
            surface.draw_frame(&layout.frame);
        }
    }

    /// Resolve a pointer x position to the sample under it across all
    /// series, plus the raw (never downsampled) timestamp of the bucket.
    /// `None` until the chart has been sized, or when it has no data.
    pub fn probe(&self, pointer_x: f64, mode: ProbeMode) -> Option<HoverReadout> {
        let layout = self.layout.as_ref()?;
        let len = layout.compressed.iter().map(|c| c.len()).max()?;
        if len == 0 || layout.horizontal_scaling <= 0.0 {
            return None;
        }

        let h = layout.horizontal_scaling;
        let x = pointer_x.max(0.0);

        // Fractional position between adjacent samples, used only in
        // interpolated mode.
        let (index, frac) = match mode {
            ProbeMode::Nearest => (nearest_index(x, h, len), None),
            ProbeMode::Interpolated => {
                let pos = (x / h).min((len - 1) as f64);
                let index = (pos as usize).min(len - 1);
                (index, Some(pos - index as f64))
            }
        };

        let values = self
            .spec
            .series
            .iter()
            .zip(&layout.compressed)
            .filter(|(_, comp)| !comp.is_empty())
            .map(|(container, comp)| {
                let vals = &comp.values;
                let i = index.min(vals.len() - 1);
                let (sx, value) = match frac {
                    None => (i as f64 * h, vals[i]),
                    Some(t) => {
                        let j = (i + 1).min(vals.len() - 1);
                        ((i as f64 + t) * h, lerp(vals[i], vals[j], t))
                    }
                };
                SeriesSample {
                    name: container.name.clone(),
                    value,
                    x: sx,
                    y: layout.scale.to_px(value),
                }
            })
            .collect();

        let stride = layout.compressed.iter().map(|c| c.stride).max().unwrap_or(1);
        let raw_index = (stride * index).min(self.spec.time.len().saturating_sub(1));
        let timestamp = self.spec.time.elements.get_numeric(raw_index)?;

        Some(HoverReadout {
            index,
            raw_index,
            timestamp,
            time_label: format_timestamp(timestamp),
            values,
        })
    }
}

/// Five evenly spaced reference lines across the padded height, each
/// captioned with the domain value that maps onto it (top line carries
/// the maximum).
fn layout_rulers(scale: &VerticalScale) -> Vec<Ruler> {
    let domain = scale.domain();
    let steps = (RULER_COUNT - 1) as f64;
    (0..RULER_COUNT)
        .map(|i| {
            let y = scale.padding_offset() + i as f64 * scale.padded_height() / steps;
            let value = domain.max - i as f64 * (domain.max - domain.min) / steps;
            Ruler { y, value, caption: format!("{value:.2}") }
        })
        .collect()
}

fn format_timestamp(timestamp: f64) -> String {
    match DateTime::from_timestamp(timestamp as i64, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("{timestamp}"),
    }
}

// File: crates/tgph-render-svg/src/lib.rs
// Summary: SVG drawing surface: fixed-size backend rendering frames as dashed rulers,
//          captions, colored polylines and an optional probe marker.

use std::fmt::Write as _;
use std::path::Path;

use tgph_chart::{ChartFrame, DrawSurface, HoverReadout};

/// A fixed-size drawing surface that accumulates one chart frame (and
/// optionally a probe overlay) and serializes it as an SVG document.
/// Swappable with any other `DrawSurface` backend; the chart engine
/// never knows it is drawing into markup.
pub struct SvgSurface {
    width: f64,
    height: f64,
    frame: Option<ChartFrame>,
    probe: Option<HoverReadout>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, frame: None, probe: None }
    }

    pub fn to_svg_string(&self) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );
        svg.push('\n');

        if let Some(frame) = &self.frame {
            for ruler in &frame.rulers {
                let _ = writeln!(
                    svg,
                    r#"  <line x1="0" y1="{y}" x2="{w}" y2="{y}" stroke="grey" stroke-opacity="0.25" stroke-dasharray="5,5"/>"#,
                    y = ruler.y,
                    w = frame.width,
                );
                let _ = writeln!(
                    svg,
                    r#"  <text x="0" y="{y}" font-size="1em">{caption}</text>"#,
                    y = ruler.y - 2.0,
                    caption = ruler.caption,
                );
            }

            for polyline in &frame.polylines {
                let mut points = String::new();
                for &(x, y) in &polyline.points {
                    let _ = write!(points, "{x},{y} ");
                }
                let _ = writeln!(
                    svg,
                    r#"  <polyline points="{points}" stroke="{color}" stroke-width="2" fill="none"/>"#,
                    points = points.trim_end(),
                    color = color_for(&polyline.name),
                );
            }
        }

        if let Some(readout) = &self.probe {
            if let Some(sample) = readout.values.first() {
                let _ = writeln!(
                    svg,
                    r#"  <line x1="{x}" y1="0" x2="{x}" y2="{h}" stroke="white" stroke-width="2"/>"#,
                    x = sample.x,
                    h = self.height,
                );
            }
            for sample in &readout.values {
                let _ = writeln!(
                    svg,
                    r#"  <circle cx="{x}" cy="{y}" r="3" stroke="white" stroke-width="2" fill="none"/>"#,
                    x = sample.x,
                    y = sample.y,
                );
            }
        }

        svg.push_str("</svg>\n");
        svg
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_svg_string())
    }
}

impl DrawSurface for SvgSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn draw_frame(&mut self, frame: &ChartFrame) {
        self.frame = Some(frame.clone());
        self.probe = None;
    }

    fn draw_probe(&mut self, readout: &HoverReadout) {
        self.probe = Some(readout.clone());
    }
}

/// Deterministic stroke color: hue folded from the first name bytes, so
/// a series keeps its color across reloads without any palette state.
fn color_for(name: &str) -> String {
    let bytes = name.as_bytes();
    let mut acc: u32 = 0;
    for (i, &b) in bytes.iter().take(3).enumerate() {
        acc |= u32::from(b) << (8 * i);
    }
    format!("hsl({}, 100%, 65%)", acc % 360)
}

// File: crates/tgph-chart/src/probe.rs
// Summary: Pointer-to-sample resolution: nearest-index snapping and fractional interpolation.

/// How a pointer x position resolves to a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeMode {
    /// Snap to whichever adjacent sample is closer in pixel space.
    /// Adequate for long series where one pixel already covers many
    /// samples.
    Nearest,
    /// Interpolate linearly between the two adjacent samples. The
    /// general contract; the reported index is the lower neighbour.
    Interpolated,
}

/// One series' contribution to a hover readout: the data value under
/// the pointer and the screen position to mark it at.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesSample {
    pub name: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

/// Resolved hover payload for the external tooltip renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverReadout {
    /// Index into the compressed series.
    pub index: usize,
    /// First raw sample index of the selected bucket (`stride * index`,
    /// clamped). Timestamps are looked up here; they are never
    /// max-reduced.
    pub raw_index: usize,
    pub timestamp: f64,
    pub time_label: String,
    pub values: Vec<SeriesSample>,
}

pub fn lerp(k0: f64, k1: f64, t: f64) -> f64 {
    k0 + t * (k1 - k0)
}

/// Index of the sample whose pixel x is closest to `pointer_x`, for
/// samples spaced `horizontal_scaling` pixels apart. Ties go to the
/// lower index; out-of-range positions clamp to the last sample.
pub fn nearest_index(pointer_x: f64, horizontal_scaling: f64, len: usize) -> usize {
    debug_assert!(len > 0);
    if horizontal_scaling <= 0.0 {
        return 0;
    }
    let i = (pointer_x.max(0.0) / horizontal_scaling) as usize;
    if i + 1 >= len {
        return len - 1;
    }
    let d0 = (pointer_x - i as f64 * horizontal_scaling).abs();
    let d1 = (pointer_x - (i + 1) as f64 * horizontal_scaling).abs();
    if d0 <= d1 {
        i
    } else {
        i + 1
    }
}

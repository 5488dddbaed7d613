// File: crates/tgph-chart/src/downsample.rs
// Summary: Max-envelope downsampling: at most one value per horizontal pixel, spikes preserved.

/// A series reduced to fit a pixel width, together with the stride that
/// produced it. `stride` raw samples fold into each output value, so
/// output index `i` covers raw indices `[i * stride, (i + 1) * stride)`.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedSeries {
    pub values: Vec<f64>,
    pub stride: usize,
}

impl CompressedSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Samples folded into one pixel column for a series of `len` samples
/// drawn at `target_width` pixels. Never zero.
pub fn stride_for(len: usize, target_width: usize) -> usize {
    (len / target_width.max(1)).max(1)
}

/// Reduce `series` to at most one value per pixel column by windowed
/// maximum. Averaging would smear out short spikes (a one-sample CPU
/// burst must stay visible), so each window keeps its maximum. A series
/// already at or below one sample per pixel is returned unchanged. The
/// final partial window is reduced like any other.
pub fn compress(series: &[f64], target_width: usize) -> CompressedSeries {
    let stride = stride_for(series.len(), target_width);
    if stride <= 1 {
        return CompressedSeries { values: series.to_vec(), stride: 1 };
    }

    let values = series
        .chunks(stride)
        .map(|window| window.iter().copied().fold(f64::NEG_INFINITY, f64::max))
        .collect();

    CompressedSeries { values, stride }
}

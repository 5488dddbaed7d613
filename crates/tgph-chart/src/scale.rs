// File: crates/tgph-chart/src/scale.rs
// Summary: Joint value domain across series and the padded vertical pixel mapping.

/// Fraction of the surface height reserved as padding above and below
/// the plot, so extrema are not drawn flush against the edge.
pub const VERTICAL_PADDING: f64 = 0.05;

/// The `[min, max]` value range a chart's vertical axis represents.
/// Computed once over every value of every series sharing the chart, so
/// all of them render against a single scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleDomain {
    pub min: f64,
    pub max: f64,
}

impl ScaleDomain {
    /// Joint min/max across all slices. No values yields the degenerate
    /// `{0, 0}` domain.
    pub fn over<'a, I>(series: I) -> Self
    where
        I: IntoIterator<Item = &'a [f64]>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for slice in series {
            for &v in slice {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 0.0 };
        }
        Self { min, max }
    }

    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }
}

/// Linear map from a value domain to vertical pixel positions. Screen y
/// grows downward, so higher values map to smaller y.
#[derive(Clone, Copy, Debug)]
pub struct VerticalScale {
    domain: ScaleDomain,
    padding_offset: f64,
    padded_height: f64,
}

impl VerticalScale {
    pub fn new(surface_height: f64, domain: ScaleDomain) -> Self {
        let padding_offset = surface_height * VERTICAL_PADDING;
        let padded_height = surface_height - 2.0 * padding_offset;
        Self { domain, padding_offset, padded_height }
    }

    pub fn domain(&self) -> ScaleDomain {
        self.domain
    }

    pub fn padding_offset(&self) -> f64 {
        self.padding_offset
    }

    pub fn padded_height(&self) -> f64 {
        self.padded_height
    }

    /// Pixel y for a value. A degenerate domain maps every value to
    /// mid-height instead of dividing by zero.
    pub fn to_px(&self, value: f64) -> f64 {
        if self.domain.is_degenerate() {
            return self.padding_offset + self.padded_height * 0.5;
        }
        let norm = (value - self.domain.min) / (self.domain.max - self.domain.min);
        self.padding_offset + self.padded_height * (1.0 - norm)
    }
}

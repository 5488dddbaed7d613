// File: crates/tgph-chart/tests/scale.rs
// Purpose: Joint domain computation and the padded, inverted vertical pixel map.

use tgph_chart::{ScaleDomain, VerticalScale, VERTICAL_PADDING};

#[test]
fn domain_spans_all_series_jointly() {
    let a = [3.0, 7.0, 5.0];
    let b = [-2.0, 4.0];
    let domain = ScaleDomain::over([a.as_slice(), b.as_slice()]);
    assert_eq!(domain, ScaleDomain { min: -2.0, max: 7.0 });
}

#[test]
fn empty_domain_is_degenerate_zero() {
    let domain = ScaleDomain::over(std::iter::empty::<&[f64]>());
    assert_eq!(domain, ScaleDomain { min: 0.0, max: 0.0 });
    assert!(domain.is_degenerate());
}

#[test]
fn map_is_monotonically_decreasing() {
    let domain = ScaleDomain { min: 0.0, max: 100.0 };
    let scale = VerticalScale::new(600.0, domain);
    let mut prev = f64::INFINITY;
    for v in [0.0, 10.0, 25.5, 50.0, 99.0, 100.0] {
        let y = scale.to_px(v);
        assert!(y < prev, "y must shrink as the value grows");
        prev = y;
    }
}

#[test]
fn extrema_stay_inside_the_padding() {
    let domain = ScaleDomain { min: -5.0, max: 20.0 };
    let height = 400.0;
    let scale = VerticalScale::new(height, domain);

    let pad = height * VERTICAL_PADDING;
    let padded = height - 2.0 * pad;

    assert_eq!(scale.to_px(domain.max), pad);
    assert_eq!(scale.to_px(domain.min), pad + padded);
}

#[test]
fn degenerate_domain_maps_to_mid_height() {
    let domain = ScaleDomain { min: 42.0, max: 42.0 };
    let scale = VerticalScale::new(200.0, domain);
    let y = scale.to_px(42.0);
    assert_eq!(y, 100.0);
    assert!(y.is_finite());
}

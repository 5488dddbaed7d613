// File: crates/tgph-chart/tests/chart.rs
// Purpose: Chart construction validation, resize layout, rulers and hover probing end to end.

use tgph_chart::{Chart, ChartError, ChartSpec, ProbeMode, RULER_COUNT, VERTICAL_PADDING};
use tgph_format::{Container, ElementArray};

fn cpu_and_time(samples: usize) -> (Container, Container) {
    let cpu = Container::new(
        "CPU Usage",
        ElementArray::F32((0..samples).map(|i| i as f32).collect()),
    );
    let time = Container::new(
        "Unix timestamp",
        ElementArray::U32((0..samples).map(|i| i as u32 * 10).collect()),
    );
    (cpu, time)
}

#[test]
fn length_mismatch_fails_at_construction() {
    let (cpu, _) = cpu_and_time(100);
    let (_, short_time) = cpu_and_time(99);
    match ChartSpec::new("CPU", vec![&cpu], &short_time) {
        Err(ChartError::LengthMismatch { expected, found, .. }) => {
            assert_eq!(expected, 99);
            assert_eq!(found, 100);
        }
        Err(other) => panic!("expected LengthMismatch, got {other}"),
        Ok(_) => panic!("mismatched spec must not construct"),
    }
}

#[test]
fn string_containers_cannot_be_charted() {
    let names = Container::new("disk_name", ElementArray::Str(vec!["sda".into()]));
    let time = Container::new("Unix timestamp", ElementArray::U32(vec![0]));
    assert!(matches!(
        ChartSpec::new("Disks", vec![&names], &time),
        Err(ChartError::NonNumeric(_))
    ));
}

#[test]
fn hundred_samples_at_width_fifty_compress_pairwise() {
    let (cpu, time) = cpu_and_time(100);
    let raw: Vec<f64> = (0..100).map(f64::from).collect();

    let spec = ChartSpec::new("CPU", vec![&cpu], &time).unwrap();
    let mut chart = Chart::new(spec);
    let frame = chart.resize(50.0, 600.0);

    assert_eq!(frame.polylines.len(), 1);
    let points = &frame.polylines[0].points;
    assert_eq!(points.len(), 50);

    // Every bucket is max(raw[2i], raw[2i+1]); x advances one pixel per bucket.
    for (i, &(x, _)) in points.iter().enumerate() {
        assert_eq!(x, i as f64);
    }

    // Domain {0, 99}: the last bucket holds the maximum and maps to the
    // top padding line.
    let pad = 600.0 * VERTICAL_PADDING;
    assert_eq!(points[49].1, pad);

    // Check a middle bucket value through the probe instead of the frame.
    let readout = chart.probe(10.0, ProbeMode::Nearest).unwrap();
    assert_eq!(readout.index, 10);
    assert_eq!(readout.values[0].value, raw[20].max(raw[21]));
}

#[test]
fn rulers_interpolate_between_min_and_max() {
    let (cpu, time) = cpu_and_time(100);
    let spec = ChartSpec::new("CPU", vec![&cpu], &time).unwrap();
    let mut chart = Chart::new(spec);
    let frame = chart.resize(50.0, 600.0);

    assert_eq!(frame.rulers.len(), RULER_COUNT);
    // Domain over the compressed values is [1, 99]: bucket 0 reduces
    // raw samples 0 and 1 to their maximum. Top line carries the
    // domain maximum, bottom the minimum.
    assert_eq!(frame.rulers[0].value, 99.0);
    assert_eq!(frame.rulers[RULER_COUNT - 1].value, 1.0);
    assert_eq!(frame.rulers[2].value, 50.0);
    assert_eq!(frame.rulers[0].caption, "99.00");
    // Evenly spaced in y.
    let dy = frame.rulers[1].y - frame.rulers[0].y;
    for pair in frame.rulers.windows(2) {
        assert!((pair[1].y - pair[0].y - dy).abs() < 1e-9);
    }
}

#[test]
fn two_series_share_one_domain() {
    let small = Container::new("Received", ElementArray::F32(vec![1.0, 2.0, 3.0, 4.0]));
    let large = Container::new("Transmitted", ElementArray::F32(vec![10.0, 20.0, 30.0, 40.0]));
    let time = Container::new("Unix timestamp", ElementArray::U32(vec![0, 10, 20, 30]));

    let spec = ChartSpec::new("Interface", vec![&small, &large], &time).unwrap();
    let mut chart = Chart::new(spec);
    let frame = chart.resize(100.0, 100.0);

    // With a joint domain of [1, 40], the small series' maximum (4.0)
    // must sit well below the large series' maximum (40.0).
    let small_last = frame.polylines[0].points[3].1;
    let large_last = frame.polylines[1].points[3].1;
    assert!(small_last > large_last);
    let pad = 100.0 * VERTICAL_PADDING;
    assert_eq!(large_last, pad);
}

#[test]
fn probe_at_exact_sample_position_returns_that_index() {
    let (cpu, time) = cpu_and_time(100);
    let spec = ChartSpec::new("CPU", vec![&cpu], &time).unwrap();
    let mut chart = Chart::new(spec);
    chart.resize(50.0, 600.0);

    // horizontal_scaling is 1.0 here, so sample i sits at x = i.
    for i in [0usize, 7, 23, 49] {
        let readout = chart.probe(i as f64, ProbeMode::Nearest).unwrap();
        assert_eq!(readout.index, i);
    }
}

#[test]
fn probe_tie_goes_to_the_lower_index() {
    let (cpu, time) = cpu_and_time(10);
    let spec = ChartSpec::new("CPU", vec![&cpu], &time).unwrap();
    let mut chart = Chart::new(spec);
    chart.resize(100.0, 600.0);

    // Samples sit 10 px apart; x = 15 is equidistant from 1 and 2.
    let readout = chart.probe(15.0, ProbeMode::Nearest).unwrap();
    assert_eq!(readout.index, 1);
}

#[test]
fn probe_clamps_past_the_last_sample() {
    let (cpu, time) = cpu_and_time(10);
    let spec = ChartSpec::new("CPU", vec![&cpu], &time).unwrap();
    let mut chart = Chart::new(spec);
    chart.resize(100.0, 600.0);

    let readout = chart.probe(10_000.0, ProbeMode::Nearest).unwrap();
    assert_eq!(readout.index, 9);
}

#[test]
fn probe_reports_raw_bucket_timestamp() {
    let (cpu, time) = cpu_and_time(100);
    let spec = ChartSpec::new("CPU", vec![&cpu], &time).unwrap();
    let mut chart = Chart::new(spec);
    chart.resize(50.0, 600.0);

    // Stride 2: compressed index 10 covers raw samples 20 and 21; the
    // timestamp is the bucket's first raw sample, never a max of times.
    let readout = chart.probe(10.0, ProbeMode::Nearest).unwrap();
    assert_eq!(readout.raw_index, 20);
    assert_eq!(readout.timestamp, 200.0);
}

#[test]
fn interpolated_probe_lerps_between_samples() {
    let cpu = Container::new("CPU Usage", ElementArray::F32(vec![0.0, 10.0, 20.0, 30.0]));
    let time = Container::new("Unix timestamp", ElementArray::U32(vec![0, 1, 2, 3]));
    let spec = ChartSpec::new("CPU", vec![&cpu], &time).unwrap();
    let mut chart = Chart::new(spec);
    chart.resize(4.0, 600.0);

    // horizontal_scaling 1.0; x = 1.5 is halfway between samples 1 and 2.
    let readout = chart.probe(1.5, ProbeMode::Interpolated).unwrap();
    assert_eq!(readout.index, 1);
    assert!((readout.values[0].value - 15.0).abs() < 1e-9);
}

#[test]
fn probe_before_first_resize_is_none() {
    let (cpu, time) = cpu_and_time(10);
    let spec = ChartSpec::new("CPU", vec![&cpu], &time).unwrap();
    let chart = Chart::new(spec);
    assert!(chart.probe(5.0, ProbeMode::Nearest).is_none());
}

#[test]
fn resize_is_recomputed_from_scratch() {
    let (cpu, time) = cpu_and_time(100);
    let spec = ChartSpec::new("CPU", vec![&cpu], &time).unwrap();
    let mut chart = Chart::new(spec);

    let wide = chart.resize(100.0, 600.0).clone();
    chart.resize(25.0, 300.0);
    let wide_again = chart.resize(100.0, 600.0).clone();
    assert_eq!(wide, wide_again);
}

#[test]
fn empty_series_produce_an_empty_frame() {
    let cpu = Container::new("CPU Usage", ElementArray::F32(Vec::new()));
    let time = Container::new("Unix timestamp", ElementArray::U32(Vec::new()));
    let spec = ChartSpec::new("CPU", vec![&cpu], &time).unwrap();
    let mut chart = Chart::new(spec);

    let frame = chart.resize(100.0, 100.0);
    assert!(frame.polylines[0].points.is_empty());
    assert!(chart.probe(50.0, ProbeMode::Nearest).is_none());
}

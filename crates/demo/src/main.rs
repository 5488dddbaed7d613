// File: crates/demo/src/main.rs
// Summary: Demo loads a TGPH snapshot, builds chart panels for selected containers,
//          renders SVGs and prints a mid-width probe readout.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use tgph_chart::{Chart, ChartSpec, DrawSurface, ProbeMode};
use tgph_format::{Container, ContainerStore, Tgph};
use tgph_render_svg::SvgSurface;

const SURFACE_WIDTH: f64 = 1024.0;
const SURFACE_HEIGHT: f64 = 640.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let input = std::env::args().nth(1).unwrap_or_else(|| "data.tgph.gz".to_string());
    let bytes = read_snapshot_bytes(Path::new(&input))
        .with_context(|| format!("reading snapshot {input}"))?;

    // Decode failure is fatal for the whole run; a partial page of
    // telemetry would be worse than none.
    let document = Tgph::decode(&bytes).context("decoding TGPH snapshot")?;
    let store = ContainerStore::from_document(document);
    info!(containers = store.len(), "decoded snapshot");
    for container in store.iter() {
        debug!(name = %container.name, len = container.len(), "container");
    }

    let time = store.by_exact_name("Unix timestamp")?;

    // One panel per interface counter pair, sharing a single scale.
    let network = series_in_step(&store, "Interface", time);
    if !network.is_empty() {
        render_panel("Network traffic", network, time)?;
    }

    let memory = store.by_exact_name("Used memory [MB]")?;
    render_panel("Used memory", vec![memory], time)?;

    for thermal in series_in_step(&store, "Thermal", time) {
        render_panel(&thermal.name, vec![thermal], time)?;
    }

    Ok(())
}

/// Containers matching `needle` whose length agrees with the time axis.
/// An out-of-step series is skipped loudly, never substituted or padded.
fn series_in_step<'a>(
    store: &'a ContainerStore,
    needle: &str,
    time: &Container,
) -> Vec<&'a Container> {
    store
        .by_name_contains(needle)
        .into_iter()
        .filter(|c| {
            let in_step = c.len() == time.len();
            if !in_step {
                warn!(
                    name = %c.name,
                    len = c.len(),
                    expected = time.len(),
                    "skipping series out of step with the time axis"
                );
            }
            in_step
        })
        .collect()
}

fn render_panel(title: &str, series: Vec<&Container>, time: &Container) -> Result<()> {
    let spec = ChartSpec::new(title, series, time)
        .with_context(|| format!("building chart {title:?}"))?;
    let mut chart = Chart::new(spec);

    let mut surface = SvgSurface::new(SURFACE_WIDTH, SURFACE_HEIGHT);
    chart.redraw(&mut surface);

    if let Some(readout) = chart.probe(SURFACE_WIDTH / 2.0, ProbeMode::Nearest) {
        info!(
            title,
            time = %readout.time_label,
            values = ?readout.values.iter().map(|s| (s.name.as_str(), s.value)).collect::<Vec<_>>(),
            "probe at mid-width"
        );
        surface.draw_probe(&readout);
    }

    let out = out_path(title);
    surface.write_to(&out).with_context(|| format!("writing {}", out.display()))?;
    info!(out = %out.display(), "wrote panel");
    Ok(())
}

fn read_snapshot_bytes(path: &Path) -> Result<Vec<u8>> {
    let raw = std::fs::read(path)?;
    if path.extension().is_some_and(|e| e == "gz") {
        let mut decoder = flate2::read::GzDecoder::new(raw.as_slice());
        let mut bytes = Vec::new();
        decoder.read_to_end(&mut bytes).context("gunzip failed")?;
        return Ok(bytes);
    }
    Ok(raw)
}

fn out_path(title: &str) -> PathBuf {
    let slug: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    PathBuf::from("target/out").join(format!("{slug}.svg"))
}

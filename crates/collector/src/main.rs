// File: crates/collector/src/main.rs
// Summary: Samples CPU, memory, swap, disk, network and thermal telemetry on an interval
//          and writes a bounded, gzip-compressed TGPH snapshot each tick.

use std::fs::File;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use sysinfo::{Components, Disks, Networks, System};
use tracing::info;

use tgph_format::Tgph;

const DEFAULT_OUTPUT: &str = "data.tgph.gz";
const DEFAULT_INTERVAL_SECS: u64 = 15;
const DEFAULT_ENTRY_LIMIT: usize = 1000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let output = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let interval = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_INTERVAL_SECS);
    let entry_limit = std::env::args()
        .nth(3)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ENTRY_LIMIT);

    info!(output = %output, interval, entry_limit, "starting collector");

    let mut sys = System::new_all();
    let mut tgph = Tgph::with_entry_limit(entry_limit);
    let mut snapshots_saved = 0u64;

    loop {
        sys.refresh_all();
        sample(&mut tgph, &sys)?;

        write_snapshot(&tgph, Path::new(&output))
            .with_context(|| format!("writing snapshot to {output}"))?;

        snapshots_saved += 1;
        info!(snapshots_saved, "saved snapshot");

        std::thread::sleep(Duration::from_secs(interval));
    }
}

/// Append one tick of telemetry. Container names match what the chart
/// page selects by exact name or substring.
fn sample(tgph: &mut Tgph, sys: &System) -> Result<()> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before the unix epoch")?
        .as_secs() as u32;
    tgph.append(now, "Unix timestamp")?;

    tgph.append(sys.cpus().len() as u32, "CPU count")?;
    tgph.append((sys.total_memory() / 1024 / 1024) as u32, "Total memory [MB]")?;
    tgph.append((sys.used_memory() / 1024 / 1024) as u32, "Used memory [MB]")?;
    tgph.append((sys.total_swap() / 1024 / 1024) as u32, "Total swap [MB]")?;
    tgph.append((sys.used_swap() / 1024 / 1024) as u32, "Used swap [MB]")?;

    let disks = Disks::new_with_refreshed_list();
    for disk in &disks {
        let name = disk.name().to_string_lossy();
        tgph.append(
            (disk.total_space() / 1024 / 1024) as u32,
            &format!("Disk {name} Total [MB]"),
        )?;
        tgph.append(
            (disk.available_space() / 1024 / 1024) as u32,
            &format!("Disk {name} Available [MB]"),
        )?;
    }

    let networks = Networks::new_with_refreshed_list();
    for (interface, data) in &networks {
        tgph.append(
            data.total_received() as u32,
            &format!("Interface {interface} Received [bytes]"),
        )?;
        tgph.append(
            data.total_transmitted() as u32,
            &format!("Interface {interface} Transmitted [bytes]"),
        )?;
    }

    let components = Components::new_with_refreshed_list();
    for component in &components {
        tgph.append(
            component.temperature(),
            &format!("Thermal {} [C]", component.label()),
        )?;
    }

    tgph.append(
        System::kernel_version().unwrap_or_else(|| "UNDEFINED".to_string()),
        "Kernel version",
    )?;
    tgph.append(
        System::os_version().unwrap_or_else(|| "UNDEFINED".to_string()),
        "OS version",
    )?;
    tgph.append(
        System::host_name().unwrap_or_else(|| "UNDEFINED".to_string()),
        "Host name",
    )?;

    Ok(())
}

fn write_snapshot(tgph: &Tgph, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    tgph.encode_into(&mut encoder)?;
    encoder.finish()?;
    Ok(())
}

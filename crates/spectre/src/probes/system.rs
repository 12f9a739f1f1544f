use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use crate::spawn::stdout_of;

use super::ProbeValue;

const TOOL_TIMEOUT: Duration = Duration::from_secs(2);
const GIB: u64 = 1024 * 1024 * 1024;
const SECTOR_BYTES: u64 = 512;

/// Aggregate and per-core CPU busy percentage from `/proc/stat`.
///
/// The first read reports the since-boot average; later reads report the
/// delta since the previous read.
#[derive(Debug, Default)]
pub(super) struct CpuSampler {
    total: Option<CpuTicks>,
    cores: Vec<CpuTicks>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct CpuTicks {
    busy: u64,
    total: u64,
}

impl CpuSampler {
    pub(super) fn total(&mut self) -> ProbeValue {
        let Some(stat) = read_proc("/proc/stat") else {
            return ProbeValue::Unavailable;
        };
        let Some(ticks) = parse_cpu_lines(&stat).into_iter().next() else {
            return ProbeValue::Unavailable;
        };
        let pct = busy_percent(self.total, ticks);
        self.total = Some(ticks);
        ProbeValue::Percent(pct)
    }

    pub(super) fn per_core(&mut self) -> ProbeValue {
        let Some(stat) = read_proc("/proc/stat") else {
            return ProbeValue::Unavailable;
        };
        let cores: Vec<CpuTicks> = parse_cpu_lines(&stat).into_iter().skip(1).collect();
        if cores.is_empty() {
            return ProbeValue::Unavailable;
        }
        let pcts = cores
            .iter()
            .enumerate()
            .map(|(idx, ticks)| busy_percent(self.cores.get(idx).copied(), *ticks))
            .take(4)
            .collect();
        self.cores = cores;
        ProbeValue::Cores(pcts)
    }
}

/// Parse the `cpu` and `cpuN` lines of `/proc/stat`, aggregate first.
pub(super) fn parse_cpu_lines(stat: &str) -> Vec<CpuTicks> {
    stat.lines()
        .filter(|line| line.starts_with("cpu"))
        .filter_map(|line| {
            let fields: Vec<u64> = line
                .split_whitespace()
                .skip(1)
                .filter_map(|field| field.parse().ok())
                .collect();
            if fields.len() < 4 {
                return None;
            }
            let total: u64 = fields.iter().sum();
            let idle = fields[3] + fields.get(4).copied().unwrap_or(0);
            Some(CpuTicks {
                busy: total.saturating_sub(idle),
                total,
            })
        })
        .collect()
}

fn busy_percent(previous: Option<CpuTicks>, current: CpuTicks) -> u8 {
    let (busy, total) = match previous {
        Some(prev) if current.total > prev.total => (
            current.busy.saturating_sub(prev.busy),
            current.total - prev.total,
        ),
        _ => (current.busy, current.total),
    };
    if total == 0 {
        return 0;
    }
    ((busy * 100) / total).min(100) as u8
}

pub(super) fn memory_usage() -> ProbeValue {
    read_proc("/proc/meminfo")
        .and_then(|text| parse_meminfo(&text))
        .unwrap_or(ProbeValue::Unavailable)
}

pub(super) fn parse_meminfo(text: &str) -> Option<ProbeValue> {
    let field = |name: &str| -> Option<u64> {
        text.lines()
            .find(|line| line.starts_with(name))
            .and_then(|line| line.split_whitespace().nth(1))
            .and_then(|value| value.parse().ok())
    };
    let total_kib = field("MemTotal:")?;
    let avail_kib = field("MemAvailable:")?;
    if total_kib == 0 {
        return None;
    }
    let used_kib = total_kib.saturating_sub(avail_kib);
    Some(ProbeValue::Usage {
        summary: format!("{}G/{}G", used_kib / 1_048_576, total_kib / 1_048_576),
        percent: ((used_kib * 100) / total_kib) as u8,
    })
}

pub(super) fn disk_usage() -> ProbeValue {
    let Ok(stat) = nix::sys::statvfs::statvfs("/") else {
        return ProbeValue::Unavailable;
    };
    let frsize = stat.fragment_size() as u64;
    let total = stat.blocks() as u64 * frsize;
    let free = stat.blocks_available() as u64 * frsize;
    if total == 0 {
        return ProbeValue::Unavailable;
    }
    let used = total.saturating_sub(free);
    ProbeValue::Usage {
        summary: format!("{}G/{}G", used / GIB, total / GIB),
        percent: ((used * 100) / total) as u8,
    }
}

pub(super) fn load_average() -> ProbeValue {
    read_proc("/proc/loadavg")
        .and_then(|text| text.split_whitespace().next().map(str::to_string))
        .map(ProbeValue::Text)
        .unwrap_or(ProbeValue::Unavailable)
}

pub(super) fn cpu_temperature() -> ProbeValue {
    for zone in 0..10 {
        let path = format!("/sys/class/thermal/thermal_zone{zone}/temp");
        if let Some(raw) = read_proc(&path) {
            if let Ok(milli) = raw.trim().parse::<i64>() {
                return ProbeValue::Text(format!("{:.1}°C", milli as f64 / 1000.0));
            }
        }
    }
    ProbeValue::Unavailable
}

pub(super) fn gpu_status() -> ProbeValue {
    let output = stdout_of(
        Command::new("nvidia-smi").args([
            "--query-gpu=utilization.gpu,temperature.gpu",
            "--format=csv,noheader,nounits",
        ]),
        TOOL_TIMEOUT,
    );
    let Some(output) = output else {
        return ProbeValue::Unavailable;
    };
    let mut parts = output.lines().next().unwrap_or("").split(',').map(str::trim);
    match (parts.next(), parts.next()) {
        (Some(util), Some(temp)) if !util.is_empty() => {
            ProbeValue::Text(format!("{util}% {temp}°C"))
        }
        _ => ProbeValue::Unavailable,
    }
}

pub(super) fn battery() -> ProbeValue {
    let root = Path::new("/sys/class/power_supply");
    for name in ["BAT0", "BAT1", "battery"] {
        let dir = root.join(name);
        let Some(capacity) = read_proc(dir.join("capacity")) else {
            continue;
        };
        let status = match read_proc(dir.join("status")).as_deref().map(str::trim) {
            Some("Charging") => "charging",
            Some("Discharging") => "on battery",
            Some(_) => "full",
            None => "?",
        };
        return ProbeValue::Text(format!("{}% {status}", capacity.trim()));
    }
    ProbeValue::Unavailable
}

pub(super) fn disk_io() -> ProbeValue {
    read_proc("/proc/diskstats")
        .and_then(|text| parse_diskstats(&text))
        .unwrap_or(ProbeValue::Unavailable)
}

pub(super) fn parse_diskstats(text: &str) -> Option<ProbeValue> {
    text.lines().find_map(|line| {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 14 || !matches!(parts[2], "sda" | "nvme0n1" | "vda") {
            return None;
        }
        let read: u64 = parts[5].parse().ok()?;
        let written: u64 = parts[9].parse().ok()?;
        Some(ProbeValue::Text(format!(
            "R:{}G W:{}G",
            read * SECTOR_BYTES / GIB,
            written * SECTOR_BYTES / GIB
        )))
    })
}

fn read_proc(path: impl AsRef<Path>) -> Option<String> {
    fs::read_to_string(path).ok()
}

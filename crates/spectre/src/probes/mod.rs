//! Best-effort system probes.
//!
//! Each probe reads one metric from `/proc`, `/sys` or a small external
//! tool. Probes never fail: anything that goes wrong (missing tool,
//! permission denied, unparsable output) yields `ProbeValue::Unavailable`.
//!
//! Submodules:
//! - system: CPU, memory, disk, load, temperature, GPU, battery, disk I/O
//! - network: identity, ping, throughput, ports, connections, discovery
//! - process: process table and forced termination
//! - preview: text file preview for the browser pane

mod network;
mod preview;
mod process;
mod system;

use std::fmt;

pub use network::{scan_network, Device, NetSpeed};
pub use preview::read_preview;
pub use process::{kill_process, list_processes, ProcessInfo};

use system::CpuSampler;

/// Every cached metric the dashboard knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Probe {
    CpuPercent,
    Memory,
    Disk,
    LoadAverage,
    NetworkIdentity,
    Ping,
    Throughput,
    CpuTemperature,
    Gpu,
    Battery,
    OpenPorts,
    Connections,
    DiskIo,
    PerCoreCpu,
}

/// Refresh cadence bucket a probe belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeGroup {
    /// Cheap reads refreshed on every frame.
    Fast,
    /// Moderately expensive reads (tools, sysfs walks).
    Monitor,
    /// Anything that touches the network.
    Network,
}

impl Probe {
    pub fn group(self) -> ProbeGroup {
        match self {
            Probe::CpuPercent | Probe::Memory | Probe::Disk | Probe::LoadAverage => {
                ProbeGroup::Fast
            }
            Probe::CpuTemperature
            | Probe::Gpu
            | Probe::Battery
            | Probe::OpenPorts
            | Probe::Connections
            | Probe::DiskIo
            | Probe::PerCoreCpu => ProbeGroup::Monitor,
            Probe::NetworkIdentity | Probe::Ping | Probe::Throughput => ProbeGroup::Network,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeValue {
    Unavailable,
    Text(String),
    Percent(u8),
    Usage { summary: String, percent: u8 },
    Network { ssid: String, ip: String },
    Throughput { down: String, up: String },
    List(Vec<String>),
    Cores(Vec<u8>),
}

impl ProbeValue {
    /// Percentage carried by the value, if any.
    pub fn percent(&self) -> Option<u8> {
        match self {
            ProbeValue::Percent(pct) | ProbeValue::Usage { percent: pct, .. } => Some(*pct),
            _ => None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, ProbeValue::Unavailable)
    }
}

impl fmt::Display for ProbeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeValue::Unavailable => write!(f, "N/A"),
            ProbeValue::Text(text) => write!(f, "{text}"),
            ProbeValue::Percent(pct) => write!(f, "{pct}%"),
            ProbeValue::Usage { summary, percent } => write!(f, "{summary} ({percent}%)"),
            ProbeValue::Network { ssid, ip } => write!(f, "{ssid} {ip}"),
            ProbeValue::Throughput { down, up } => write!(f, "D:{down} U:{up}"),
            ProbeValue::List(items) if items.is_empty() => write!(f, "None"),
            ProbeValue::List(items) => write!(f, "{}", items.join(",")),
            ProbeValue::Cores(cores) => {
                let parts: Vec<String> = cores.iter().map(|pct| format!("{pct}%")).collect();
                write!(f, "{}", parts.join(" "))
            }
        }
    }
}

/// Source of probe readings consumed by the stat cache.
pub trait ProbeSource {
    fn read(&mut self, probe: Probe) -> ProbeValue;
}

/// Probes backed by the running Linux host.
///
/// Holds the sampling state some probes need between reads (CPU tick
/// deltas, interface byte counters), so it must live as long as the cache.
#[derive(Debug, Default)]
pub struct SystemProbes {
    cpu: CpuSampler,
    net: NetSpeed,
}

impl SystemProbes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProbeSource for SystemProbes {
    fn read(&mut self, probe: Probe) -> ProbeValue {
        match probe {
            Probe::CpuPercent => self.cpu.total(),
            Probe::PerCoreCpu => self.cpu.per_core(),
            Probe::Memory => system::memory_usage(),
            Probe::Disk => system::disk_usage(),
            Probe::LoadAverage => system::load_average(),
            Probe::CpuTemperature => system::cpu_temperature(),
            Probe::Gpu => system::gpu_status(),
            Probe::Battery => system::battery(),
            Probe::DiskIo => system::disk_io(),
            Probe::NetworkIdentity => network::identity(),
            Probe::Ping => network::ping_latency(),
            Probe::Throughput => self.net.sample(),
            Probe::OpenPorts => network::open_ports(),
            Probe::Connections => network::established_connections(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Probe, ProbeGroup, ProbeValue};

    #[test]
    fn display_formats_each_shape() {
        assert_eq!(ProbeValue::Unavailable.to_string(), "N/A");
        assert_eq!(ProbeValue::Percent(42).to_string(), "42%");
        assert_eq!(
            ProbeValue::Usage {
                summary: "3G/16G".to_string(),
                percent: 18
            }
            .to_string(),
            "3G/16G (18%)"
        );
        assert_eq!(ProbeValue::List(Vec::new()).to_string(), "None");
        assert_eq!(
            ProbeValue::List(vec!["22".to_string(), "80".to_string()]).to_string(),
            "22,80"
        );
    }

    #[test]
    fn groups_match_refresh_buckets() {
        assert_eq!(Probe::CpuPercent.group(), ProbeGroup::Fast);
        assert_eq!(Probe::Battery.group(), ProbeGroup::Monitor);
        assert_eq!(Probe::Ping.group(), ProbeGroup::Network);
    }

    #[test]
    fn percent_reads_usage_and_percent() {
        assert_eq!(ProbeValue::Percent(7).percent(), Some(7));
        assert_eq!(ProbeValue::Text("x".to_string()).percent(), None);
    }
}

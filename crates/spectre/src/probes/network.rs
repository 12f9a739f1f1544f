use std::fs;
use std::net::UdpSocket;
use std::process::Command;
use std::time::{Duration, Instant};

use crate::spawn::stdout_of;

use super::ProbeValue;

const TOOL_TIMEOUT: Duration = Duration::from_secs(2);
const SCAN_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_PORTS: usize = 6;
const MAX_DEVICES: usize = 20;

/// A host seen on the local network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub ip: String,
    pub mac: String,
    pub vendor: String,
}

pub(super) fn identity() -> ProbeValue {
    let ssid = stdout_of(Command::new("iwgetid").arg("-r"), TOOL_TIMEOUT)
        .map(|out| out.trim().to_string())
        .map(|ssid| if ssid.is_empty() { "Ethernet".to_string() } else { ssid });
    let ip = local_ip();
    if ssid.is_none() && ip.is_none() {
        return ProbeValue::Unavailable;
    }
    ProbeValue::Network {
        ssid: ssid.unwrap_or_else(|| "N/A".to_string()),
        ip: ip.unwrap_or_else(|| "N/A".to_string()),
    }
}

/// Address of the interface holding the default route. Connecting a UDP
/// socket sends no packets.
fn local_ip() -> Option<String> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|addr| addr.ip().to_string())
}

pub(super) fn ping_latency() -> ProbeValue {
    stdout_of(
        Command::new("ping").args(["-c", "1", "-W", "1", "8.8.8.8"]),
        TOOL_TIMEOUT,
    )
    .and_then(|out| parse_ping(&out))
    .map(ProbeValue::Text)
    .unwrap_or(ProbeValue::Unavailable)
}

pub(super) fn parse_ping(output: &str) -> Option<String> {
    let rest = output.split("time=").nth(1)?;
    let value: f64 = rest.split_whitespace().next()?.parse().ok()?;
    Some(format!("{value:.1}ms"))
}

/// Interface byte counters turned into down/up rates between samples.
#[derive(Debug, Default)]
pub struct NetSpeed {
    last: Option<(u64, u64, Instant)>,
    down: String,
    up: String,
}

impl NetSpeed {
    pub fn sample(&mut self) -> ProbeValue {
        let Some((rx, tx)) = read_net_bytes() else {
            return ProbeValue::Unavailable;
        };
        self.record(rx, tx, Instant::now())
    }

    fn record(&mut self, rx: u64, tx: u64, now: Instant) -> ProbeValue {
        if let Some((last_rx, last_tx, last_at)) = self.last {
            let elapsed = now.duration_since(last_at).as_secs_f64();
            if elapsed > 0.0 {
                self.down = format_rate(rx.saturating_sub(last_rx) as f64 / elapsed);
                self.up = format_rate(tx.saturating_sub(last_tx) as f64 / elapsed);
            }
        } else {
            self.down = format_rate(0.0);
            self.up = format_rate(0.0);
        }
        self.last = Some((rx, tx, now));
        ProbeValue::Throughput {
            down: self.down.clone(),
            up: self.up.clone(),
        }
    }
}

fn read_net_bytes() -> Option<(u64, u64)> {
    let text = fs::read_to_string("/proc/net/dev").ok()?;
    Some(parse_net_dev(&text))
}

pub(super) fn parse_net_dev(text: &str) -> (u64, u64) {
    text.lines()
        .skip(2)
        .filter_map(|line| {
            let (iface, counters) = line.split_once(':')?;
            if iface.trim() == "lo" {
                return None;
            }
            let fields: Vec<u64> = counters
                .split_whitespace()
                .filter_map(|field| field.parse().ok())
                .collect();
            Some((*fields.first()?, *fields.get(8)?))
        })
        .fold((0, 0), |(rx, tx), (r, t)| (rx + r, tx + t))
}

fn format_rate(bytes_per_sec: f64) -> String {
    if bytes_per_sec >= 1_048_576.0 {
        format!("{:.1}MB/s", bytes_per_sec / 1_048_576.0)
    } else if bytes_per_sec >= 1024.0 {
        format!("{:.1}KB/s", bytes_per_sec / 1024.0)
    } else {
        format!("{bytes_per_sec:.0}B/s")
    }
}

pub(super) fn open_ports() -> ProbeValue {
    stdout_of(Command::new("ss").arg("-tuln"), TOOL_TIMEOUT)
        .map(|out| ProbeValue::List(parse_listening_ports(&out)))
        .unwrap_or(ProbeValue::Unavailable)
}

pub(super) fn parse_listening_ports(output: &str) -> Vec<String> {
    let mut ports: Vec<String> = Vec::new();
    for line in output.lines().skip(1) {
        if !line.contains("LISTEN") {
            continue;
        }
        let Some(local) = line.split_whitespace().nth(4) else {
            continue;
        };
        let Some(port) = local.rsplit(':').next() else {
            continue;
        };
        if !port.is_empty()
            && port.chars().all(|ch| ch.is_ascii_digit())
            && !ports.iter().any(|seen| seen == port)
        {
            ports.push(port.to_string());
        }
        if ports.len() >= MAX_PORTS {
            break;
        }
    }
    ports
}

pub(super) fn established_connections() -> ProbeValue {
    stdout_of(
        Command::new("ss").args(["-t", "state", "established"]),
        TOOL_TIMEOUT,
    )
    .map(|out| {
        let rows = out.lines().filter(|line| !line.trim().is_empty()).count();
        ProbeValue::Text(rows.saturating_sub(1).to_string())
    })
    .unwrap_or(ProbeValue::Unavailable)
}

/// Discover devices on the local network.
///
/// Tries `arp-scan -l` when a local subnet is routed, then falls back to
/// the kernel ARP cache. Returns at most 20 devices; empty on any failure.
pub fn scan_network() -> Vec<Device> {
    let has_subnet = stdout_of(Command::new("ip").arg("route"), TOOL_TIMEOUT)
        .map(|out| local_subnet(&out).is_some())
        .unwrap_or(false);
    if !has_subnet {
        return Vec::new();
    }
    let mut devices = stdout_of(Command::new("arp-scan").arg("-l"), SCAN_TIMEOUT)
        .map(|out| parse_arp_scan(&out))
        .unwrap_or_default();
    if devices.is_empty() {
        devices = stdout_of(Command::new("arp").arg("-n"), TOOL_TIMEOUT)
            .map(|out| parse_arp_cache(&out))
            .unwrap_or_default();
    }
    devices.truncate(MAX_DEVICES);
    devices
}

pub(super) fn local_subnet(routes: &str) -> Option<String> {
    routes
        .lines()
        .filter(|line| line.contains("src") && !line.contains("default"))
        .flat_map(str::split_whitespace)
        .find(|part| part.contains('/') && part.contains('.'))
        .map(str::to_string)
}

pub(super) fn parse_arp_scan(output: &str) -> Vec<Device> {
    output
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() < 3 || !parts[0].contains('.') {
                return None;
            }
            Some(Device {
                ip: parts[0].to_string(),
                mac: truncate(parts[1], 17),
                vendor: truncate(parts[2], 20),
            })
        })
        .collect()
}

pub(super) fn parse_arp_cache(output: &str) -> Vec<Device> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 || !parts[0].contains('.') {
                return None;
            }
            Some(Device {
                ip: parts[0].to_string(),
                mac: truncate(parts[2], 17),
                vendor: "Unknown".to_string(),
            })
        })
        .collect()
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_time_is_extracted() {
        let out = "64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=13.37 ms\n";
        assert_eq!(parse_ping(out), Some("13.4ms".to_string()));
        assert_eq!(parse_ping("100% packet loss"), None);
    }

    #[test]
    fn net_dev_skips_loopback() {
        let text = "Inter-|   Receive\n face |bytes\n    lo: 500 1 0 0 0 0 0 0 500 1 0 0 0 0 0 0\n  eth0: 1000 10 0 0 0 0 0 0 2000 20 0 0 0 0 0 0\n";
        assert_eq!(parse_net_dev(text), (1000, 2000));
    }

    #[test]
    fn throughput_reports_rate_between_samples() {
        let mut speed = NetSpeed::default();
        let start = Instant::now();
        let first = speed.record(0, 0, start);
        assert_eq!(
            first,
            ProbeValue::Throughput {
                down: "0B/s".to_string(),
                up: "0B/s".to_string()
            }
        );
        let second = speed.record(2048, 2 * 1_048_576, start + Duration::from_secs(1));
        assert_eq!(
            second,
            ProbeValue::Throughput {
                down: "2.0KB/s".to_string(),
                up: "2.0MB/s".to_string()
            }
        );
    }

    #[test]
    fn listening_ports_are_deduplicated_and_capped() {
        let out = "Netid State  Recv-Q Send-Q Local Address:Port Peer Address:Port\n\
tcp   LISTEN 0      128    0.0.0.0:22         0.0.0.0:*\n\
tcp   LISTEN 0      128    [::]:22            [::]:*\n\
udp   UNCONN 0      0      0.0.0.0:68         0.0.0.0:*\n\
tcp   LISTEN 0      128    127.0.0.1:5432     0.0.0.0:*\n";
        assert_eq!(parse_listening_ports(out), vec!["22", "5432"]);
    }

    #[test]
    fn subnet_comes_from_src_route() {
        let routes = "default via 192.168.1.1 dev wlan0\n192.168.1.0/24 dev wlan0 proto kernel scope link src 192.168.1.20\n";
        assert_eq!(local_subnet(routes), Some("192.168.1.0/24".to_string()));
        assert_eq!(local_subnet("default via 10.0.0.1 dev eth0\n"), None);
    }

    #[test]
    fn arp_outputs_become_devices() {
        let scan = "Interface: wlan0\n192.168.1.1\taa:bb:cc:dd:ee:ff\tSome Router Vendor Incorporated\n";
        let devices = parse_arp_scan(scan);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].vendor, "Some Router Vendor I");

        let cache = "Address HWtype HWaddress Flags Mask Iface\n192.168.1.7 ether 11:22:33:44:55:66 C wlan0\n";
        let devices = parse_arp_cache(cache);
        assert_eq!(devices[0].mac, "11:22:33:44:55:66");
        assert_eq!(devices[0].vendor, "Unknown");
    }
}

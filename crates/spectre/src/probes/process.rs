use std::process::Command;
use std::time::Duration;

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;

use crate::spawn::stdout_of;

const PS_TIMEOUT: Duration = Duration::from_secs(3);
const NAME_WIDTH: usize = 15;

/// One row of the process table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: String,
    pub name: String,
    pub cpu: String,
    pub elapsed: String,
}

/// Up to `limit` processes, highest CPU first. Empty when `ps` is missing.
pub fn list_processes(limit: usize) -> Vec<ProcessInfo> {
    stdout_of(
        Command::new("ps").args(["-eo", "pid,comm,%cpu,etime", "--sort=-%cpu"]),
        PS_TIMEOUT,
    )
    .map(|out| parse_ps(&out, limit))
    .unwrap_or_default()
}

pub(super) fn parse_ps(output: &str, limit: usize) -> Vec<ProcessInfo> {
    let mut rows: Vec<ProcessInfo> = output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 4 {
                return None;
            }
            // `comm` may contain spaces; pid is first, the last two are cpu and etime.
            let name = parts[1..parts.len() - 2].join(" ");
            Some(ProcessInfo {
                pid: parts[0].to_string(),
                name: name.chars().take(NAME_WIDTH).collect(),
                cpu: parts[parts.len() - 2].to_string(),
                elapsed: parts[parts.len() - 1].to_string(),
            })
        })
        .collect();
    rows.sort_by(|a, b| cpu_value(b).total_cmp(&cpu_value(a)));
    rows.truncate(limit);
    rows
}

fn cpu_value(info: &ProcessInfo) -> f64 {
    info.cpu.parse().unwrap_or(0.0)
}

/// Send SIGKILL to `pid`.
pub fn kill_process(pid: i32) -> Result<(), Errno> {
    kill(Pid::from_raw(pid), Signal::SIGKILL)
}

//! Configuration loading.
//!
//! Config is read once at startup from `$SPECTRE_CONFIG_PATH`, or
//! `$XDG_CONFIG_HOME/spectre/config.toml` (falling back to
//! `~/.config/spectre/config.toml`). Every field is optional; anything
//! missing or unparsable falls back to the built-in defaults.
//!
//! ```toml
//! [keymap]
//! quit = "ctrl+q"
//! cycle_theme = "ctrl+t"
//!
//! [shell]
//! program = "/bin/sh"
//! timeout_secs = 10
//! interactive = ["hx", "k9s"]
//!
//! [probes]
//! monitor_secs = 2
//! network_secs = 5
//!
//! [thresholds]
//! cpu = 80
//! memory = 85
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(test)]
mod tests;

const DEFAULT_QUIT: &str = "ctrl+q";
const DEFAULT_CYCLE_THEME: &str = "ctrl+t";
const DEFAULT_SHELL: &str = "/bin/sh";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FAST_SECS: u64 = 0;
const DEFAULT_MONITOR_SECS: u64 = 2;
const DEFAULT_NETWORK_SECS: u64 = 5;
const DEFAULT_CPU_THRESHOLD: u8 = 80;
const DEFAULT_MEMORY_THRESHOLD: u8 = 85;

/// Programs that need the real terminal instead of captured output.
pub const DEFAULT_INTERACTIVE: &[&str] = &[
    // editors
    "vim", "vi", "nvim", "nano", "emacs", "joe", "jed", "micro",
    // monitors
    "htop", "top", "btop", "nvtop", "atop", "glances", "watch",
    // pagers and manuals
    "less", "more", "man", "info",
    // remote access
    "ssh", "sftp", "ftp", "telnet", "nc",
    // interpreters and shells
    "python", "python3", "ipython", "node", "ruby", "perl", "php", "lua",
    "bash", "sh", "zsh", "fish", "dash", "ksh", "csh", "tcsh",
    // multiplexers
    "tmux", "screen", "zellij",
    // privilege escalation
    "sudo", "su", "doas",
    // tools that prompt or page
    "git", "docker", "kubectl", "ping", "traceroute",
    // file managers and disk tools
    "mc", "ranger", "nnn", "lf", "fdisk", "cfdisk", "gdisk", "parted",
    // text browsers
    "lynx", "w3m", "links", "elinks",
    // agents
    "opencode",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub keymap: KeymapConfig,
    pub shell: ShellConfig,
    pub probes: ProbeIntervals,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone)]
pub struct KeymapConfig {
    pub quit: String,
    pub cycle_theme: String,
}

#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Host shell used as `<program> -c <command>`.
    pub program: String,
    /// Wall-clock limit for captured commands.
    pub timeout: Duration,
    /// First tokens that trigger an interactive handoff.
    pub interactive: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeIntervals {
    pub fast: Duration,
    pub monitor: Duration,
    pub network: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Warn when CPU usage rises above this percentage.
    pub cpu: u8,
    /// Warn when memory usage rises above this percentage.
    pub memory: u8,
}

impl Default for Config {
    fn default() -> Self {
        merge_config(None)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_SHELL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            interactive: DEFAULT_INTERACTIVE.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl Default for ProbeIntervals {
    fn default() -> Self {
        Self {
            fast: Duration::from_secs(DEFAULT_FAST_SECS),
            monitor: Duration::from_secs(DEFAULT_MONITOR_SECS),
            network: Duration::from_secs(DEFAULT_NETWORK_SECS),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu: DEFAULT_CPU_THRESHOLD,
            memory: DEFAULT_MEMORY_THRESHOLD,
        }
    }
}

impl ShellConfig {
    pub fn is_interactive(&self, program: &str) -> bool {
        self.interactive.iter().any(|name| name == program)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    keymap: Option<RawKeymap>,
    shell: Option<RawShell>,
    probes: Option<RawProbes>,
    thresholds: Option<RawThresholds>,
}

#[derive(Debug, Default, Deserialize)]
struct RawKeymap {
    #[serde(alias = "Quit")]
    quit: Option<String>,
    #[serde(alias = "cycleTheme")]
    cycle_theme: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawShell {
    program: Option<String>,
    #[serde(alias = "timeoutSecs")]
    timeout_secs: Option<u64>,
    interactive: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProbes {
    #[serde(alias = "fastSecs")]
    fast_secs: Option<u64>,
    #[serde(alias = "monitorSecs")]
    monitor_secs: Option<u64>,
    #[serde(alias = "networkSecs")]
    network_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawThresholds {
    cpu: Option<u8>,
    memory: Option<u8>,
}

fn read_toml(path: &Path) -> Option<RawConfig> {
    let contents = fs::read_to_string(path).ok()?;
    if contents.trim().is_empty() {
        return None;
    }
    match toml::from_str::<RawConfig>(&contents) {
        Ok(raw) => Some(raw),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring invalid config");
            None
        }
    }
}

fn merge_config(raw: Option<RawConfig>) -> Config {
    let raw = raw.unwrap_or_default();
    let keymap = raw.keymap.unwrap_or_default();
    let shell = raw.shell.unwrap_or_default();
    let probes = raw.probes.unwrap_or_default();
    let thresholds = raw.thresholds.unwrap_or_default();

    let mut interactive: Vec<String> =
        DEFAULT_INTERACTIVE.iter().map(|name| name.to_string()).collect();
    for extra in shell.interactive.unwrap_or_default() {
        let extra = extra.trim().to_string();
        if !extra.is_empty() && !interactive.contains(&extra) {
            interactive.push(extra);
        }
    }

    let program = shell
        .program
        .map(|program| program.trim().to_string())
        .filter(|program| !program.is_empty())
        .unwrap_or_else(|| DEFAULT_SHELL.to_string());

    Config {
        keymap: KeymapConfig {
            quit: keymap.quit.unwrap_or_else(|| DEFAULT_QUIT.to_string()),
            cycle_theme: keymap
                .cycle_theme
                .unwrap_or_else(|| DEFAULT_CYCLE_THEME.to_string()),
        },
        shell: ShellConfig {
            program,
            timeout: Duration::from_secs(
                shell.timeout_secs.filter(|secs| *secs > 0).unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            interactive,
        },
        probes: ProbeIntervals {
            fast: Duration::from_secs(probes.fast_secs.unwrap_or(DEFAULT_FAST_SECS)),
            monitor: Duration::from_secs(probes.monitor_secs.unwrap_or(DEFAULT_MONITOR_SECS)),
            network: Duration::from_secs(probes.network_secs.unwrap_or(DEFAULT_NETWORK_SECS)),
        },
        thresholds: Thresholds {
            cpu: thresholds.cpu.unwrap_or(DEFAULT_CPU_THRESHOLD).min(100),
            memory: thresholds.memory.unwrap_or(DEFAULT_MEMORY_THRESHOLD).min(100),
        },
    }
}

/// Base directory for spectre's config and state files.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME").filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(dir).join("spectre"));
    }
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("spectre"))
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SPECTRE_CONFIG_PATH").filter(|path| !path.is_empty()) {
        return Some(PathBuf::from(path));
    }
    Some(config_dir()?.join("config.toml"))
}

pub fn load_config() -> Config {
    let raw = config_path().and_then(|path| read_toml(&path));
    merge_config(raw)
}

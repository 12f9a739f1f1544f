//! Built-in commands handled without spawning a process.

use crate::probes::{Device, ProcessInfo};

/// Rows of the process table shown by `proc`.
pub const PROC_ROWS: usize = 30;
/// Processes fetched before the table is cut to `PROC_ROWS`.
pub const PROC_FETCH: usize = 50;

pub const HELP_LINES: [&str; 9] = [
    "╔═════════ TERMINAL COMMANDS ═════════╗",
    "║ proc       - List active processes  ║",
    "║ scan       - Network device scan    ║",
    "║ kill <pid> - Terminate a process    ║",
    "║ cd <dir>   - Change directory       ║",
    "║ clear      - Clear terminal output  ║",
    "║ about      - System details         ║",
    "║ exit/quit  - Terminate SPECTRE      ║",
    "╚═════════════════════════════════════╝",
];

pub const SCAN_HINT: &str = "No devices found (try: sudo arp-scan -l)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Builtin {
    Help,
    About,
    Clear,
    /// Target path as typed, `None` for a bare `cd`.
    Cd(Option<String>),
    Proc,
    Scan,
    /// Raw pid argument, `None` when missing.
    Kill(Option<String>),
    Exit,
}

/// Recognize a built-in by its first token, ignoring case.
pub fn parse_builtin(line: &str) -> Option<Builtin> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let rest = (!rest.is_empty()).then(|| rest.to_string());
    let builtin = match head.to_lowercase().as_str() {
        "help" => Builtin::Help,
        "about" => Builtin::About,
        "clear" => Builtin::Clear,
        "cd" => Builtin::Cd(rest),
        "proc" => Builtin::Proc,
        "scan" => Builtin::Scan,
        "kill" => Builtin::Kill(rest),
        "exit" | "quit" => Builtin::Exit,
        _ => return None,
    };
    Some(builtin)
}

pub fn proc_lines(processes: &[ProcessInfo]) -> Vec<String> {
    let mut lines = vec![
        format!("{:<8} {:<16} {:<8} TIME", "PID", "NAME", "CPU%"),
        "-".repeat(45),
    ];
    lines.extend(processes.iter().take(PROC_ROWS).map(|proc| {
        format!(
            "{:<8} {:<16} {:<8} {}",
            proc.pid, proc.name, proc.cpu, proc.elapsed
        )
    }));
    lines
}

pub fn scan_lines(devices: &[Device]) -> Vec<String> {
    if devices.is_empty() {
        return vec![SCAN_HINT.to_string()];
    }
    let mut lines = vec![format!("{:<16} {:<18} VENDOR", "IP", "MAC"), "-".repeat(55)];
    lines.extend(
        devices
            .iter()
            .map(|device| format!("{:<16} {:<18} {}", device.ip, device.mac, device.vendor)),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_match_case_insensitively() {
        assert_eq!(parse_builtin("HELP"), Some(Builtin::Help));
        assert_eq!(parse_builtin("  Quit "), Some(Builtin::Exit));
        assert_eq!(parse_builtin("exit"), Some(Builtin::Exit));
        assert_eq!(parse_builtin("ls -la"), None);
        assert_eq!(parse_builtin("!help"), None);
    }

    #[test]
    fn cd_keeps_the_rest_of_the_line() {
        assert_eq!(parse_builtin("cd"), Some(Builtin::Cd(None)));
        assert_eq!(
            parse_builtin("cd  My Documents "),
            Some(Builtin::Cd(Some("My Documents".to_string())))
        );
        assert_eq!(
            parse_builtin("kill 42"),
            Some(Builtin::Kill(Some("42".to_string())))
        );
        assert_eq!(parse_builtin("kill"), Some(Builtin::Kill(None)));
    }

    #[test]
    fn help_block_has_nine_lines() {
        assert_eq!(HELP_LINES.len(), 9);
        let width = HELP_LINES[0].chars().count();
        assert!(HELP_LINES.iter().all(|line| line.chars().count() == width));
    }

    #[test]
    fn proc_table_is_capped() {
        let processes: Vec<ProcessInfo> = (0..PROC_FETCH)
            .map(|idx| ProcessInfo {
                pid: idx.to_string(),
                name: "worker".to_string(),
                cpu: "1.0".to_string(),
                elapsed: "00:01".to_string(),
            })
            .collect();
        let lines = proc_lines(&processes);
        assert_eq!(lines.len(), PROC_ROWS + 2);
        assert!(lines[0].starts_with("PID      NAME"));
        assert_eq!(lines[2], "0        worker           1.0      00:01");
    }

    #[test]
    fn empty_scan_shows_hint() {
        assert_eq!(scan_lines(&[]), vec![SCAN_HINT.to_string()]);
        let lines = scan_lines(&[Device {
            ip: "10.0.0.1".to_string(),
            mac: "aa:bb:cc:dd:ee:ff".to_string(),
            vendor: "Unknown".to_string(),
        }]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), 55);
    }
}

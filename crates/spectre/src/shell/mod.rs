//! Terminal pane shell.
//!
//! Owns everything behind the terminal pane: the line editor, command
//! history, the bounded scrollback and the execution state machine.
//!
//! A submitted line is echoed with its prompt, then dispatched:
//! - built-ins run in-process (`help`, `cd`, `kill`, ...)
//! - allow-listed programs, or lines starting with `!`, are handed the
//!   real terminal until they exit
//! - everything else runs captured through the host shell with a timeout
//!
//! Every path ends back in `ExecutionState::Idle`.
//!
//! Submodules:
//! - scrollback: bounded output log
//! - history: submitted commands and recall cursor
//! - editor: single-line input buffer
//! - builtins: built-in command parsing and table rendering
//! - handoff: display surface release/reacquire around interactive children

mod builtins;
mod editor;
mod handoff;
mod history;
mod scrollback;


use std::io;
use std::path::{Component, Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use thiserror::Error;

use crate::config::ShellConfig;
use crate::probes::{kill_process, list_processes, scan_network};
use crate::spawn::{run_with_timeout, Finished};

pub use builtins::{parse_builtin, Builtin, HELP_LINES};
pub use editor::LineEditor;
pub use handoff::{run_interactive, DisplaySurface, Suspended};
pub use history::CommandHistory;
pub use scrollback::{LineKind, Scrollback, ScrollbackLine, SCROLLBACK_CAPACITY};

/// Lines moved per PageUp/PageDown.
pub const PAGE_SCROLL: usize = 10;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("cd: {0}: No such directory")]
    DirectoryInvalid(String),
    #[error("kill: usage: kill <pid>")]
    MissingPid,
    #[error("kill: {0}: invalid pid")]
    InvalidPid(String),
    #[error("kill: ({pid}) - {source}")]
    Signal {
        pid: i32,
        #[source]
        source: nix::errno::Errno,
    },
    #[error("Timeout after {0}s")]
    Timeout(u64),
    #[error("Error: {0}")]
    Spawn(#[source] io::Error),
    #[error("Error: {0}")]
    Wait(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Idle,
    Captured,
    Interactive,
}

/// Where a submitted line goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Builtin(Builtin),
    /// Handed the real terminal. `forced` is set for `!`-prefixed lines.
    Interactive { command: String, forced: bool },
    Captured(String),
}

/// Decide how to run `line`. Built-ins win, then the `!` marker, then the
/// interactive allow-list; anything else is captured.
pub fn classify(line: &str, config: &ShellConfig) -> Dispatch {
    let line = line.trim();
    if let Some(builtin) = parse_builtin(line) {
        return Dispatch::Builtin(builtin);
    }
    if let Some(rest) = line.strip_prefix('!') {
        return Dispatch::Interactive {
            command: rest.trim().to_string(),
            forced: true,
        };
    }
    let program = line.split_whitespace().next().unwrap_or_default();
    if config.is_interactive(program) {
        return Dispatch::Interactive {
            command: line.to_string(),
            forced: false,
        };
    }
    Dispatch::Captured(line.to_string())
}

/// Keys the terminal pane understands, already decoded from raw events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Up,
    Down,
    Enter,
    PageUp,
    PageDown,
}

pub struct ShellSession {
    pub scrollback: Scrollback,
    pub history: CommandHistory,
    pub editor: LineEditor,
    state: ExecutionState,
    cwd: PathBuf,
    home: PathBuf,
    user: String,
    host: String,
    scroll_offset: usize,
    exit_requested: bool,
    redraw_requested: bool,
    config: ShellConfig,
    started: Instant,
}

impl ShellSession {
    pub fn new(config: ShellConfig, cwd: PathBuf) -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        let user = std::env::var("USER")
            .ok()
            .filter(|user| !user.is_empty())
            .unwrap_or_else(|| "ghost".to_string());
        let host = nix::unistd::gethostname()
            .ok()
            .map(|host| host.to_string_lossy().to_string())
            .filter(|host| !host.is_empty())
            .unwrap_or_else(|| "localhost".to_string());
        Self::with_identity(config, cwd, home, user, host)
    }

    pub fn with_identity(
        config: ShellConfig,
        cwd: PathBuf,
        home: PathBuf,
        user: String,
        host: String,
    ) -> Self {
        let mut session = Self {
            scrollback: Scrollback::new(),
            history: CommandHistory::new(),
            editor: LineEditor::new(),
            state: ExecutionState::Idle,
            cwd,
            home,
            user,
            host,
            scroll_offset: 0,
            exit_requested: false,
            redraw_requested: false,
            config,
            started: Instant::now(),
        };
        for line in session.banner() {
            session.scrollback.output(line);
        }
        session
    }

    fn banner(&self) -> Vec<String> {
        let rule = "═".repeat(51);
        vec![
            format!("╔{rule}╗"),
            format!(
                "║  {:<49}║",
                format!("SPECTRE Terminal | {}@{}", self.user, self.host)
            ),
            format!("║  {:<49}║", "Commands: help, proc, scan, kill <pid>, clear"),
            format!("╚{rule}╝"),
            String::new(),
        ]
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// True once after an interactive child has scribbled on the screen.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// `user@host:~/dir$ ` with the home directory shown as `~`.
    pub fn prompt(&self) -> String {
        let dir = match self.cwd.strip_prefix(&self.home) {
            Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => self.cwd.display().to_string(),
        };
        format!("{}@{}:{}$ ", self.user, self.host, dir)
    }

    pub fn handle_key(&mut self, key: EditKey, surface: &mut dyn DisplaySurface) {
        match key {
            EditKey::Char(ch) => self.editor.insert(ch),
            EditKey::Backspace => self.editor.backspace(),
            EditKey::Delete => self.editor.delete(),
            EditKey::Left => self.editor.move_left(),
            EditKey::Right => self.editor.move_right(),
            EditKey::Home => self.editor.move_home(),
            EditKey::End => self.editor.move_end(),
            EditKey::Up => {
                if let Some(entry) = self.history.recall_older() {
                    let entry = entry.to_string();
                    self.editor.set(&entry);
                }
            }
            EditKey::Down => {
                if let Some(entry) = self.history.recall_newer() {
                    let entry = entry.to_string();
                    self.editor.set(&entry);
                }
            }
            EditKey::PageUp => {
                self.scroll_offset = (self.scroll_offset + PAGE_SCROLL).min(self.scrollback.len());
            }
            EditKey::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_sub(PAGE_SCROLL);
            }
            EditKey::Enter => self.submit(surface),
        }
    }

    /// Submit the editor line. Blank lines are dropped without a trace.
    pub fn submit(&mut self, surface: &mut dyn DisplaySurface) {
        let line = self.editor.take();
        if line.trim().is_empty() {
            self.history.reset_recall();
            return;
        }
        self.execute(&line, surface);
    }

    /// Record, echo and run one command line.
    pub fn execute(&mut self, line: &str, surface: &mut dyn DisplaySurface) {
        self.scroll_offset = 0;
        self.history.push(line);
        let echo = format!("{}{}", self.prompt(), line);
        self.scrollback.push(LineKind::Echo, echo);

        match classify(line, &self.config) {
            Dispatch::Builtin(builtin) => self.run_builtin(builtin),
            Dispatch::Interactive { command, forced } => {
                self.run_interactive(&command, forced, surface)
            }
            Dispatch::Captured(command) => self.run_captured(&command),
        }
        self.state = ExecutionState::Idle;
    }

    fn report(&mut self, err: ShellError) {
        tracing::debug!(%err, "shell command failed");
        self.scrollback.error(err.to_string());
    }

    fn run_builtin(&mut self, builtin: Builtin) {
        match builtin {
            Builtin::Help => {
                for line in HELP_LINES {
                    self.scrollback.output(line);
                }
            }
            Builtin::About => {
                let about = self.about_lines();
                for line in about {
                    self.scrollback.output(line);
                }
            }
            Builtin::Clear => self.scrollback.clear(),
            Builtin::Cd(target) => {
                if let Err(err) = self.change_dir(target.as_deref()) {
                    self.report(err);
                }
            }
            Builtin::Proc => {
                for line in builtins::proc_lines(&list_processes(builtins::PROC_FETCH)) {
                    self.scrollback.output(line);
                }
            }
            Builtin::Scan => {
                self.scrollback.output("Scanning network...");
                for line in builtins::scan_lines(&scan_network()) {
                    self.scrollback.output(line);
                }
            }
            Builtin::Kill(pid) => match kill(pid.as_deref()) {
                Ok(pid) => self.scrollback.output(format!("Killed process {pid}")),
                Err(err) => self.report(err),
            },
            Builtin::Exit => {
                self.scrollback.output("Terminating session...");
                self.exit_requested = true;
            }
        }
    }

    fn about_lines(&self) -> Vec<String> {
        let uptime = self.started.elapsed().as_secs();
        vec![
            format!("SPECTRE System Interface v{VERSION}"),
            format!("Operator: {} // Host: {} // Protocol: GHOST", self.user, self.host),
            format!(
                "Session uptime: {:02}:{:02}:{:02}",
                uptime / 3600,
                (uptime % 3600) / 60,
                uptime % 60
            ),
            format!(
                "Last system breach: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M")
            ),
        ]
    }

    /// Move the shell to `target`. Bare `cd` goes home; a missing target
    /// leaves the cwd untouched.
    pub fn change_dir(&mut self, target: Option<&str>) -> Result<(), ShellError> {
        let resolved = match target {
            None | Some("~") => self.home.clone(),
            Some(path) => match path.strip_prefix("~/") {
                Some(rest) => self.home.join(rest),
                None => self.cwd.join(path),
            },
        };
        let resolved = normalize(&resolved);
        if !resolved.is_dir() {
            return Err(ShellError::DirectoryInvalid(resolved.display().to_string()));
        }
        self.cwd = resolved;
        Ok(())
    }

    fn run_captured(&mut self, command: &str) {
        self.state = ExecutionState::Captured;
        let mut cmd = Command::new(&self.config.program);
        cmd.arg("-c")
            .arg(command)
            .current_dir(&self.cwd)
            .env("TERM", "xterm");
        tracing::info!(command, cwd = %self.cwd.display(), "captured command");

        match run_with_timeout(&mut cmd, self.config.timeout) {
            Ok(Finished::Exited(captured)) => {
                for line in captured.stdout.trim_end().lines() {
                    self.scrollback.output(line);
                }
                for line in captured.stderr.trim_end().lines() {
                    self.scrollback.error(format!("[err] {line}"));
                }
            }
            Ok(Finished::TimedOut) => {
                tracing::warn!(command, "captured command timed out");
                let err = ShellError::Timeout(self.config.timeout.as_secs());
                self.scrollback.error(format!("[{err}]"));
            }
            Err(err) => {
                tracing::warn!(command, %err, "captured command failed to start");
                self.scrollback.error(format!("[{}]", ShellError::Spawn(err)));
            }
        }
    }

    fn run_interactive(&mut self, command: &str, forced: bool, surface: &mut dyn DisplaySurface) {
        self.state = ExecutionState::Interactive;
        self.redraw_requested = true;
        let program = self.config.program.clone();
        match run_interactive(surface, &program, command, &self.cwd) {
            Ok(_) => {
                let label = if forced {
                    "interactive mode"
                } else {
                    command.split_whitespace().next().unwrap_or(command)
                };
                self.scrollback.status(format!("[Exited {label}]"));
            }
            Err(err) => self.scrollback.error(format!("[{err}]")),
        }
    }
}

fn kill(pid: Option<&str>) -> Result<i32, ShellError> {
    let raw = pid.ok_or(ShellError::MissingPid)?;
    let pid: i32 = raw
        .parse()
        .map_err(|_| ShellError::InvalidPid(raw.to_string()))?;
    // 0 and negatives address process groups.
    if pid <= 0 {
        return Err(ShellError::InvalidPid(raw.to_string()));
    }
    kill_process(pid).map_err(|source| ShellError::Signal { pid, source })?;
    tracing::info!(pid, "sent SIGKILL");
    Ok(pid)
}

/// Lexically resolve `.` and `..` without touching symlinks.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push("/");
    }
    out
}

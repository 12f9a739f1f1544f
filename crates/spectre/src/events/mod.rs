//! Dashboard event ticker.
//!
//! One bounded log shared by real notices (directory changes, theme
//! switches, threshold warnings) and cosmetic flavor lines. Every entry
//! goes through `push`; the tag is the only difference between kinds.
//!
//! The newest entry is shown in the status bar. The log keeps the 20
//! most recent entries, newest first.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;

pub const EVENT_LOG_CAPACITY: usize = 20;

const FLAVOR_MIN_SECS: u64 = 10;
const FLAVOR_MAX_SECS: u64 = 30;

const FLAVOR_MESSAGES: &[&str] = &[
    "Encrypted connection established",
    "Scanning local subnet...",
    "Packet intercepted [TCP/80]",
    "Brute-force mitigation active",
    "Rootkit check: Clean",
    "Public IP hidden",
    "Proxy chain: 3 nodes",
    "Handshake captured",
    "Buffer flushed",
    "Daemon restarted",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Info,
    Warning,
    Cosmetic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: EventKind,
    pub timestamp: String,
    pub message: String,
}

impl LogEntry {
    /// Ticker form: `[HH:MM:SS] message`.
    pub fn line(&self) -> String {
        format!("[{}] {}", self.timestamp, self.message)
    }
}

#[derive(Debug)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    next_flavor_at: Instant,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        let mut log = Self {
            entries: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            next_flavor_at: now + flavor_gap(),
        };
        log.info("System initialized.");
        log
    }

    /// Append an entry, evicting the oldest once the log is full.
    pub fn push(&mut self, kind: EventKind, message: impl Into<String>) {
        let entry = LogEntry {
            kind,
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            message: message.into(),
        };
        match kind {
            EventKind::Warning => tracing::warn!(message = %entry.message, "dashboard warning"),
            EventKind::Info => tracing::debug!(message = %entry.message, "dashboard event"),
            EventKind::Cosmetic => {}
        }
        while self.entries.len() >= EVENT_LOG_CAPACITY {
            self.entries.pop_back();
        }
        self.entries.push_front(entry);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(EventKind::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(EventKind::Warning, message);
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a flavor line when its randomized timer has run out.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if now < self.next_flavor_at {
            return;
        }
        self.next_flavor_at = now + flavor_gap();
        let message = FLAVOR_MESSAGES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("Buffer flushed");
        self.push(EventKind::Cosmetic, message);
    }
}

fn flavor_gap() -> Duration {
    Duration::from_secs(rand::thread_rng().gen_range(FLAVOR_MIN_SECS..=FLAVOR_MAX_SECS))
}

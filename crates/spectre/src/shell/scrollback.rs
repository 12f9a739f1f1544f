//! Bounded output log for the terminal pane.
//!
//! Lines are kept in insertion order. Once the buffer holds `capacity`
//! lines, every append evicts the oldest one. The only other mutation is
//! an explicit `clear`.

use std::collections::VecDeque;

pub const SCROLLBACK_CAPACITY: usize = 500;

/// What produced a line. Renderers use this to pick a highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Banner text and command stdout.
    Output,
    /// Command stderr and inline error reports.
    Error,
    /// The prompt plus the submitted command.
    Echo,
    /// Lifecycle notes such as "[Exited vim]".
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollbackLine {
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug)]
pub struct Scrollback {
    lines: VecDeque<ScrollbackLine>,
    capacity: usize,
}

impl Default for Scrollback {
    fn default() -> Self {
        Self::new()
    }
}

impl Scrollback {
    pub fn new() -> Self {
        Self::with_capacity(SCROLLBACK_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, kind: LineKind, text: impl Into<String>) {
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(ScrollbackLine {
            kind,
            text: text.into(),
        });
    }

    pub fn output(&mut self, text: impl Into<String>) {
        self.push(LineKind::Output, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(LineKind::Error, text);
    }

    pub fn status(&mut self, text: impl Into<String>) {
        self.push(LineKind::Status, text);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ScrollbackLine> {
        self.lines.iter()
    }

    pub fn last(&self) -> Option<&ScrollbackLine> {
        self.lines.back()
    }

    /// Largest useful scroll offset for a viewport `height` lines tall.
    pub fn max_offset(&self, height: usize) -> usize {
        self.lines.len().saturating_sub(height)
    }

    /// Lines visible in a viewport `height` lines tall, scrolled `offset`
    /// lines up from the bottom. The offset is clamped.
    pub fn window(&self, height: usize, offset: usize) -> impl Iterator<Item = &ScrollbackLine> {
        let offset = offset.min(self.max_offset(height));
        let end = self.lines.len() - offset;
        let start = end.saturating_sub(height);
        self.lines.range(start..end)
    }
}

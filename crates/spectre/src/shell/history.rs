//! Submitted command history with an up/down recall cursor.

/// Append-only list of submitted commands.
///
/// The recall cursor counts back from the most recent entry: `Some(0)` is
/// the newest command, `None` means the user is not recalling. Recalling
/// never mutates the stored entries.
#[derive(Debug, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted command and reset recall.
    pub fn push(&mut self, command: impl Into<String>) {
        self.entries.push(command.into());
        self.cursor = None;
    }

    pub fn reset_recall(&mut self) {
        self.cursor = None;
    }

    /// Step one entry further into the past.
    ///
    /// Returns the entry to show, or `None` when already at the oldest
    /// entry (or the history is empty) and nothing changed.
    pub fn recall_older(&mut self) -> Option<&str> {
        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        self.entry_at(next)
    }

    /// Step one entry back toward the present.
    ///
    /// Returns `Some("")` when leaving recall for the blank line, and
    /// `None` when not recalling at all.
    pub fn recall_newer(&mut self) -> Option<&str> {
        match self.cursor {
            None => None,
            Some(0) => {
                self.cursor = None;
                Some("")
            }
            Some(cursor) => {
                self.cursor = Some(cursor - 1);
                self.entry_at(cursor - 1)
            }
        }
    }

    /// Recall position in the `-1 ..= len - 1` convention.
    pub fn recall_index(&self) -> isize {
        self.cursor.map_or(-1, |cursor| cursor as isize)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_at(&self, back: usize) -> Option<&str> {
        let idx = self.entries.len().checked_sub(back + 1)?;
        self.entries.get(idx).map(String::as_str)
    }
}

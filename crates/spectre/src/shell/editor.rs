//! Single-line input editor for the terminal pane.

/// Text buffer plus a cursor measured in characters.
///
/// The cursor always sits in `0..=len` where `len` is the character count.
#[derive(Debug, Default, Clone)]
pub struct LineEditor {
    buffer: String,
    cursor: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Text left of the cursor, used to place the caret on screen.
    pub fn before_cursor(&self) -> &str {
        &self.buffer[..self.byte_offset(self.cursor)]
    }

    pub fn insert(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.buffer.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.buffer.remove(at);
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.buffer.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Replace the buffer (history recall) and park the cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.len();
    }

    /// Return the buffer and reset to an empty line.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(chars)
            .map(|(idx, _)| idx)
            .unwrap_or(self.buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::LineEditor;

    fn typed(text: &str) -> LineEditor {
        let mut editor = LineEditor::new();
        for ch in text.chars() {
            editor.insert(ch);
        }
        editor
    }

    #[test]
    fn insert_in_the_middle() {
        let mut editor = typed("lx");
        editor.move_left();
        editor.insert('s');
        assert_eq!(editor.as_str(), "lsx");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn backspace_and_delete_respect_bounds() {
        let mut editor = typed("ab");
        editor.move_home();
        editor.backspace();
        assert_eq!(editor.as_str(), "ab");
        editor.delete();
        assert_eq!(editor.as_str(), "b");
        editor.move_end();
        editor.delete();
        assert_eq!(editor.as_str(), "b");
        editor.backspace();
        assert!(editor.is_empty());
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn cursor_never_passes_end() {
        let mut editor = typed("é!");
        editor.move_right();
        editor.move_right();
        assert_eq!(editor.cursor(), 2);
        editor.move_left();
        assert_eq!(editor.before_cursor(), "é");
    }

    #[test]
    fn set_and_take() {
        let mut editor = LineEditor::new();
        editor.set("git status");
        assert_eq!(editor.cursor(), 10);
        assert_eq!(editor.take(), "git status");
        assert!(editor.is_empty());
        assert_eq!(editor.cursor(), 0);
    }
}

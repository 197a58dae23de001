//! Single-line query editor
//!
//! Holds the text the user is typing and a character-based cursor. Every
//! edit that changes the text returns `true` so the caller can forward the
//! new query to the widget.

/// Editable query buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    buffer: String,
    /// Cursor position (character index, not byte)
    cursor: usize,
}

impl QueryInput {
    /// Create an empty input
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the buffer is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Replace the text, moving the cursor to the end
    pub fn set(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.chars().count();
    }

    /// Get byte index from cursor (character) position
    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) -> bool {
        let byte_idx = self.byte_index();
        self.buffer.insert(byte_idx, c);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let byte_idx = self.byte_index();
        let prev_byte_idx = self.buffer[..byte_idx]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
        self.buffer.remove(prev_byte_idx);
        self.cursor -= 1;
        true
    }

    /// Delete the character at the cursor
    pub fn delete(&mut self) -> bool {
        let byte_idx = self.byte_index();
        if byte_idx >= self.buffer.len() {
            return false;
        }
        self.buffer.remove(byte_idx);
        true
    }

    /// Delete the word before the cursor (Ctrl+W)
    pub fn delete_word_backwards(&mut self) -> bool {
        let byte_idx = self.byte_index();
        if byte_idx == 0 {
            return false;
        }
        let trimmed = self.buffer[..byte_idx].trim_end();
        let new_end = trimmed
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8));

        self.buffer.drain(new_end..byte_idx);
        self.cursor = self.buffer[..new_end].chars().count();
        true
    }

    /// Clear the whole line (Ctrl+U)
    pub fn clear(&mut self) -> bool {
        if self.buffer.is_empty() {
            return false;
        }
        self.buffer.clear();
        self.cursor = 0;
        true
    }

    /// Move cursor left
    pub const fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start
    pub const fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end
    pub fn cursor_end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }
}

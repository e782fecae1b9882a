//! UTF-8 safe text buffer with cursor management.
//!
//! Backs the masked key field. The cursor is a byte index that always sits on
//! a char boundary, so every editing primitive can slice `input` directly.

#[derive(Clone, Debug, Default)]
pub struct TextInputState {
    /// The underlying text buffer
    input: String,
    /// Cursor byte index into `input` (always on a UTF-8 boundary)
    cursor: usize,
}

impl TextInputState {
    /// Buffer seeded with `input`, cursor at the end.
    pub fn with_input<S: Into<String>>(input: S) -> Self {
        let input = input.into();
        let cursor = input.len();
        Self { input, cursor }
    }

    // ----- Getters -----
    pub fn input(&self) -> &str {
        &self.input
    }
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn is_blank(&self) -> bool {
        self.input.trim().is_empty()
    }
    pub fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Number of chars before the cursor.
    pub fn cursor_chars(&self) -> usize {
        self.input[..self.cursor].chars().count()
    }

    // ----- Setters -----

    /// Place the cursor before the char at `char_index`, clamped to the end.
    pub fn set_cursor_chars(&mut self, char_index: usize) {
        self.cursor = self
            .input
            .char_indices()
            .nth(char_index)
            .map(|(byte_index, _)| byte_index)
            .unwrap_or(self.input.len());
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    // ----- Editing primitives (UTF-8 safe) -----

    /// Move cursor one Unicode scalar to the left.
    pub fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev_len = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        self.cursor = self.cursor.saturating_sub(prev_len);
    }

    /// Move cursor one Unicode scalar to the right.
    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor = self.cursor.saturating_add(next.len_utf8());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    /// Insert a char at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a string at the cursor, dropping line breaks.
    pub fn insert_str(&mut self, text: &str) {
        let cleaned: String = text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        self.input.insert_str(self.cursor, &cleaned);
        self.cursor += cleaned.len();
    }

    /// Backspace the char immediately before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.input[..self.cursor].chars().last().map(|c| c.len_utf8()).unwrap_or(1);
        let start = self.cursor - prev;
        self.input.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            let end = self.cursor + next.len_utf8();
            self.input.drain(self.cursor..end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_move_insert_backspace() {
        let mut st = TextInputState::with_input("h🙂llo"); // emoji is 4 bytes
        st.set_cursor_chars(1); // between h and 🙂
        st.insert_char('e');
        assert_eq!(st.input(), "he🙂llo");
        st.move_right(); // step over 🙂
        st.backspace(); // delete 🙂
        assert_eq!(st.input(), "hello");
        st.move_left();
        st.backspace();
        assert_eq!(st.input(), "ello");
    }

    #[test]
    fn delete_removes_char_under_cursor() {
        let mut st = TextInputState::with_input("abc");
        st.move_home();
        st.delete();
        assert_eq!(st.input(), "bc");
        st.move_end();
        st.delete();
        assert_eq!(st.input(), "bc");
    }

    #[test]
    fn insert_str_strips_line_breaks() {
        let mut st = TextInputState::with_input("AI");
        st.insert_str("za\r\nXYZ\n");
        assert_eq!(st.input(), "AIzaXYZ");
        assert_eq!(st.cursor(), st.input().len());
    }

    #[test]
    fn set_cursor_chars_lands_on_char_boundaries() {
        let mut st = TextInputState::with_input("a界b");
        st.set_cursor_chars(2);
        assert_eq!(st.cursor(), "a界".len());
        assert_eq!(st.cursor_chars(), 2);
        st.set_cursor_chars(99);
        assert_eq!(st.cursor(), st.input().len());
        st.move_left();
        assert_eq!(st.cursor_chars(), 2);
    }

    #[test]
    fn blank_detection_ignores_whitespace() {
        assert!(TextInputState::with_input("  \t ").is_blank());
        assert!(!TextInputState::with_input(" x ").is_blank());
    }
}

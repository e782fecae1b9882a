use keyentry_util::{GEMINI_KEY_PREFIX, looks_like_gemini_key};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use thiserror::Error;

use crate::ui::components::common::TextInputState;

/// Validation failure raised when the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyEntryError {
    /// The field was empty or whitespace-only.
    #[error("Enter an API key (Gemini)")]
    Empty,
}

/// Local state of the key entry form: the raw key buffer, the inline error
/// and the focus flags of the two focusable widgets.
///
/// Every editing method clears the error, whether or not the buffer changed.
#[derive(Debug, Default, Clone)]
pub struct KeyEntryState {
    buffer: TextInputState,
    error: Option<String>,

    /// Container and widget focus.
    pub container_focus: FocusFlag,
    pub f_input: FocusFlag,
    pub f_submit: FocusFlag,
}

impl KeyEntryState {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            buffer: TextInputState::with_input(initial),
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        self.buffer.input()
    }

    pub fn buffer(&self) -> &TextInputState {
        &self.buffer
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Hint shown while the key does not look like a Gemini key.
    ///
    /// Never set for an empty field, and never blocks submission.
    pub fn key_hint(&self) -> Option<String> {
        if self.buffer.is_blank() || looks_like_gemini_key(self.buffer.input()) {
            return None;
        }
        Some(format!("Gemini API keys usually start with \"{GEMINI_KEY_PREFIX}\""))
    }

    // ----- Editing -----

    /// Applies a buffer edit, clearing the error only if the value changed.
    fn edit(&mut self, apply: impl FnOnce(&mut TextInputState)) {
        // Every content edit on a single-line buffer changes its length.
        let before = self.buffer.input().len();
        apply(&mut self.buffer);
        if self.buffer.input().len() != before {
            self.clear_error();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.edit(|buffer| buffer.insert_char(c));
    }

    pub fn insert_str(&mut self, text: &str) {
        self.edit(|buffer| buffer.insert_str(text));
    }

    pub fn backspace(&mut self) {
        self.edit(TextInputState::backspace);
    }

    pub fn delete(&mut self) {
        self.edit(TextInputState::delete);
    }

    pub fn clear(&mut self) {
        self.edit(TextInputState::clear);
    }

    // ----- Cursor -----

    pub fn move_left(&mut self) {
        self.buffer.move_left();
    }

    pub fn move_right(&mut self) {
        self.buffer.move_right();
    }

    pub fn move_home(&mut self) {
        self.buffer.move_home();
    }

    pub fn move_end(&mut self) {
        self.buffer.move_end();
    }

    pub fn set_cursor_chars(&mut self, char_index: usize) {
        self.buffer.set_cursor_chars(char_index);
    }

    /// Validate the field, returning the trimmed key.
    ///
    /// On failure the error message is stored for inline display. The buffer
    /// is left untouched in both cases.
    pub fn validate(&mut self) -> Result<String, KeyEntryError> {
        let trimmed = self.buffer.input().trim();
        if trimmed.is_empty() {
            let error = KeyEntryError::Empty;
            self.error = Some(error.to_string());
            return Err(error);
        }
        Ok(trimmed.to_string())
    }
}

impl HasFocus for KeyEntryState {
    fn build(&self, builder: &mut FocusBuilder) {
        let start = builder.start(self);
        builder.leaf_widget(&self.f_input);
        builder.leaf_widget(&self.f_submit);
        builder.end(start);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

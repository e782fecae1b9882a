//! # Keyentry TUI Library
//!
//! A terminal form that collects a Google Gemini API key. The key is typed
//! into a masked field, validated to be non-blank, and handed to a
//! caller-supplied callback; it is held in memory only for the lifetime of
//! the form.
//!
//! ## Architecture
//!
//! - [`KeyEntryForm`] owns the field state and the save callback and can be
//!   driven without a terminal.
//! - The key entry component renders the form with Ratatui and maps key and
//!   mouse input onto it.
//! - The runtime owns the terminal (on stderr) and runs until the key is
//!   submitted or the user cancels.

mod app;
mod ui;

use anyhow::Result;

pub use keyentry_types::Outcome;
pub use ui::components::common::TextInputState;
pub use ui::components::key_entry::{KeyEntryError, KeyEntryForm, KeyEntryState, SaveCallback};
pub use ui::theme::{THEME_ENV, ThemeId};

/// Options for a key entry session.
#[derive(Clone, Default)]
pub struct RunOptions {
    /// Value the field starts with.
    pub initial_key: String,
    /// Theme name override, see [`ThemeId::resolve`].
    pub theme: Option<String>,
}

/// Runs the key entry form until the key is submitted or the user cancels.
///
/// `on_save` is called exactly once with the trimmed key when a non-blank
/// key is submitted; it is never called on cancellation.
///
/// # Errors
///
/// Returns an error when the terminal cannot be put into (or restored from)
/// raw mode and the alternate screen, or when drawing fails.
pub async fn run<'a>(options: RunOptions, on_save: impl FnMut(String) + 'a) -> Result<Outcome> {
    let theme = ui::theme::load(options.theme.as_deref());
    let form = KeyEntryForm::new(options.initial_key, on_save);
    ui::runtime::run_app(form, theme).await
}

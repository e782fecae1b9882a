mod form;
mod key_entry_component;
mod state;

pub use form::{KeyEntryForm, SaveCallback};
pub use key_entry_component::{KeyEntryComponent, PANEL_HEIGHT, PANEL_WIDTH};
pub use state::{KeyEntryError, KeyEntryState};

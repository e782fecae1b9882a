use std::fmt;

use keyentry_util::mask_secret;
use tracing::{debug, info};

use super::state::{KeyEntryError, KeyEntryState};

/// Callback receiving the trimmed key on a successful submission.
pub type SaveCallback<'a> = Box<dyn FnMut(String) + 'a>;

/// The key entry form: local state plus the caller's save callback.
///
/// Submitting validates the field and, when it is non-blank, hands the trimmed
/// key to the callback exactly once. The form neither clears nor stores the
/// key afterwards.
pub struct KeyEntryForm<'a> {
    state: KeyEntryState,
    on_save: SaveCallback<'a>,
}

impl<'a> KeyEntryForm<'a> {
    pub fn new(initial: impl Into<String>, on_save: impl FnMut(String) + 'a) -> Self {
        Self {
            state: KeyEntryState::new(initial),
            on_save: Box::new(on_save),
        }
    }

    pub fn state(&self) -> &KeyEntryState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut KeyEntryState {
        &mut self.state
    }

    pub fn submit(&mut self) -> Result<(), KeyEntryError> {
        let key = match self.state.validate() {
            Ok(key) => key,
            Err(error) => {
                debug!("Rejected key submission: {}", error);
                return Err(error);
            }
        };
        if let Some(hint) = self.state.key_hint() {
            debug!(hint = %hint, "Submitting key with unexpected shape");
        }
        info!(key = %mask_secret(&key), "API key submitted");
        (self.on_save)(key);
        Ok(())
    }
}

impl fmt::Debug for KeyEntryForm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEntryForm")
            .field("key", &mask_secret(self.state.input()))
            .field("error", &self.state.error())
            .finish_non_exhaustive()
    }
}

//! Shared message and effect types for the key entry UI.
//!
//! Components translate terminal input into [`Effect`]s and receive
//! runtime notifications as [`Msg`]s. Keeping these in their own crate lets
//! the binary match on [`Outcome`] without depending on UI internals.

/// Notifications delivered from the runtime to components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Terminal was resized to the given width and height.
    Resize(u16, u16),
    /// Text pasted into the terminal (bracketed paste).
    Paste(String),
}

/// Side effects requested by components and carried out by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// A key passed validation and was handed to the save callback.
    Submitted,
    /// The user abandoned key entry.
    Cancel,
}

/// How a key entry session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Submitted,
    Cancelled,
}

impl Outcome {
    pub fn is_submitted(self) -> bool {
        matches!(self, Outcome::Submitted)
    }
}

/// Severity used for inline status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

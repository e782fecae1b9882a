//! UI components: the masked key entry form and its shared building blocks.

pub mod common;
pub mod component;
pub mod key_entry;

pub(crate) use component::Component;
pub use key_entry::KeyEntryComponent;

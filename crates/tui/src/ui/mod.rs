//! UI rendering module for the TUI application.
//!
//! Holds the key entry component, the theme layer, the top-level draw
//! function and the runtime that owns the terminal.

pub mod components;
pub mod main;
pub mod runtime;
pub mod theme;

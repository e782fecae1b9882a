//! Component system for the key entry TUI.
//!
//! Components own their local rendering state, translate terminal input into
//! changes on [`App`], and report side effects back to the runtime as
//! [`Effect`]s instead of acting on the terminal directly.

use crossterm::event::{KeyEvent, MouseEvent};
use keyentry_types::{Effect, Msg};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::app::App;

/// A UI element with its own state and behavior.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: key and mouse input arrive through `handle_key_events()`
///    and `handle_mouse_events()`; runtime notifications through `handle_message()`
/// 2. **Rendering**: `render()` draws the component into the provided area and
///    records whatever geometry later hit-testing needs
pub(crate) trait Component {
    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App<'_>, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events.
    ///
    /// Hit-testing uses the areas recorded during the previous `render()`.
    fn handle_mouse_events(&mut self, _app: &mut App<'_>, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle a runtime notification such as a resize or a paste.
    fn handle_message(&mut self, _app: &mut App<'_>, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing,
    /// cursor placement and recording layout for hit-testing.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App<'_>);

    /// Key binding hints for the hint bar.
    fn get_hint_spans(&self, _app: &App<'_>) -> Vec<Span<'_>> {
        Vec::new()
    }
}

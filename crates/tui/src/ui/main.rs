use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::app::App;
use crate::ui::components::key_entry::{PANEL_HEIGHT, PANEL_WIDTH};
use crate::ui::components::{Component, KeyEntryComponent};

/// Renders the whole screen: themed background, the centred key entry panel
/// and the hint bar beneath it.
pub fn draw(frame: &mut Frame, app: &mut App<'_>, key_entry: &mut KeyEntryComponent) {
    let area = frame.area();
    frame.render_widget(Block::default().style(app.theme.text_primary_style().bg(app.theme.roles().background)), area);

    let (panel, hints) = centered_panel(area);
    key_entry.render(frame, panel, app);

    let hint_line = Line::from(key_entry.get_hint_spans(app)).centered();
    frame.render_widget(Paragraph::new(hint_line), hints);
}

/// Splits `area` into the panel rectangle and a one-line hint bar below it,
/// both centred and clamped to the available space.
pub fn centered_panel(area: Rect) -> (Rect, Rect) {
    let [column] = Layout::horizontal([Constraint::Length(PANEL_WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [panel, hints] = Layout::vertical([
        Constraint::Length(PANEL_HEIGHT.min(area.height.saturating_sub(1))),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .areas(column);
    (panel, hints)
}

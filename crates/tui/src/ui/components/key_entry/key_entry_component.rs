use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use keyentry_types::{Effect, Msg, Severity};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Margin, Position, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Borders, Paragraph, Wrap};
use tracing::debug;

use super::state::KeyEntryState;
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::Theme;
use crate::ui::theme::theme_helpers::{self as th, ButtonRenderOptions, build_hint_spans};

pub const TITLE: &str = "API key settings";
pub const FIELD_LABEL: &str = "Gemini API Key";
pub const PLACEHOLDER: &str = "AIza...";
pub const SUBMIT_LABEL: &str = "Save and start";
pub const API_KEY_URL: &str = "https://aistudio.google.com/app/apikey";
const DESCRIPTION: [&str; 2] = [
    "An API key is required to use the Google Gemini API.",
    "The key is kept in memory for this session only and discarded on exit.",
];
const MASK_CHAR: char = '•';
const KEY_GLYPH: &str = "🔑 ";
const ALERT_GLYPH: &str = "⚠ ";

/// Height of the bordered panel, borders included.
pub const PANEL_HEIGHT: u16 = 19;
/// Preferred width of the bordered panel.
pub const PANEL_WIDTH: u16 = 78;

/// Tracks rendered rectangles for pointer hit-testing.
#[derive(Debug, Default, Clone)]
struct KeyEntryLayoutState {
    input_area: Rect,
    submit_area: Rect,
    /// Chars scrolled off the left edge of the input.
    input_scroll: usize,
}

/// Masked key form: header, description, field, status line, submit
/// button and the link to Google AI Studio.
#[derive(Debug, Default)]
pub struct KeyEntryComponent {
    layout: KeyEntryLayoutState,
}

impl KeyEntryComponent {
    fn submit(&mut self, app: &mut App<'_>) -> Vec<Effect> {
        match app.form.submit() {
            Ok(()) => vec![Effect::Submitted],
            Err(_) => {
                app.focus_input();
                Vec::new()
            }
        }
    }

    fn get_preferred_layout(&self, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(1), // header
            Constraint::Length(1), // spacer
            Constraint::Length(2), // description
            Constraint::Length(1), // spacer
            Constraint::Length(1), // field label
            Constraint::Length(3), // masked input
            Constraint::Length(1), // error / hint
            Constraint::Length(1), // spacer
            Constraint::Length(3), // submit button
            Constraint::Length(1), // spacer
            Constraint::Length(2), // footer link
        ])
        .split(area)
        .to_vec()
    }
}

impl Component for KeyEntryComponent {
    fn handle_key_events(&mut self, app: &mut App<'_>, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => return vec![Effect::Cancel],
            KeyCode::Enter => return self.submit(app),
            KeyCode::Tab => {
                app.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                app.focus.prev();
                return Vec::new();
            }
            _ => {}
        }

        if app.submit_focused() {
            if key.code == KeyCode::Char(' ') {
                return self.submit(app);
            }
            return Vec::new();
        }

        handle_input_key(app.form.state_mut(), key);
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App<'_>, mouse: MouseEvent) -> Vec<Effect> {
        let MouseEvent { kind, column, row, .. } = mouse;
        if kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let position = Position::new(column, row);
        if self.layout.submit_area.contains(position) {
            app.focus.focus(&app.form.state().f_submit);
            return self.submit(app);
        }
        if self.layout.input_area.contains(position) {
            app.focus_input();
            let inner_x = self.layout.input_area.x.saturating_add(1);
            let clicked = column.saturating_sub(inner_x) as usize + self.layout.input_scroll;
            app.form.state_mut().set_cursor_chars(clicked);
        }
        Vec::new()
    }

    fn handle_message(&mut self, app: &mut App<'_>, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::Paste(text) => {
                app.focus_input();
                app.form.state_mut().insert_str(&text);
            }
            Msg::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
            }
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App<'_>) {
        let theme = &*app.theme;
        let state = app.form.state();
        let block = th::block(theme, None, false);
        let inner = block.inner(rect).inner(Margin::new(1, 0));
        frame.render_widget(block, rect);

        let areas = self.get_preferred_layout(inner);
        let [header, _, description, _, label, input, status, _, button, _, footer] = areas[..] else {
            return;
        };

        let header_line = Line::from(vec![
            Span::styled(KEY_GLYPH, theme.accent_primary_style()),
            Span::styled(TITLE, theme.text_secondary_style().add_modifier(Modifier::BOLD)),
        ]);
        frame.render_widget(Paragraph::new(header_line), header);

        let description_lines: Vec<Line> = DESCRIPTION
            .iter()
            .map(|line| Line::from(Span::styled(*line, theme.text_primary_style())))
            .collect();
        frame.render_widget(Paragraph::new(description_lines).wrap(Wrap { trim: true }), description);

        frame.render_widget(
            Paragraph::new(Span::styled(FIELD_LABEL, theme.text_secondary_style())),
            label,
        );

        let input_focused = app.input_focused();
        self.layout.input_scroll = render_masked_input(frame, input, state, theme, input_focused);
        self.layout.input_area = input;

        if let Some((severity, message)) = status_line(state) {
            let glyph = if severity == Severity::Error { ALERT_GLYPH } else { "" };
            let line = Line::from(vec![
                Span::styled(glyph, theme.status_style(severity)),
                Span::styled(message, theme.status_style(severity)),
            ]);
            frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), status);
        }

        th::render_button(
            frame,
            button,
            SUBMIT_LABEL,
            theme,
            ButtonRenderOptions::new(true, app.submit_focused(), Borders::ALL),
        );
        self.layout.submit_area = button;

        let footer_lines = vec![
            Line::from(Span::styled("Get an API key (Google AI Studio)", theme.text_muted_style())),
            Line::from(Span::styled(API_KEY_URL, theme.link_style())),
        ];
        frame.render_widget(Paragraph::new(footer_lines).alignment(Alignment::Center), footer);
    }

    fn get_hint_spans(&self, app: &App<'_>) -> Vec<Span<'_>> {
        build_hint_spans(
            &*app.theme,
            &[("Enter", " Save  "), ("Tab/Shift+Tab", " Focus  "), ("Ctrl+U", " Clear  "), ("Esc", " Cancel")],
        )
    }
}

/// Editing keys for the focused field.
fn handle_input_key(state: &mut KeyEntryState, key: KeyEvent) {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if control => state.clear(),
        KeyCode::Char('a') if control => state.move_home(),
        KeyCode::Char('e') if control => state.move_end(),
        KeyCode::Char(c) if !control && !key.modifiers.contains(KeyModifiers::ALT) => state.insert_char(c),
        KeyCode::Backspace => state.backspace(),
        KeyCode::Delete => state.delete(),
        KeyCode::Left => state.move_left(),
        KeyCode::Right => state.move_right(),
        KeyCode::Home => state.move_home(),
        KeyCode::End => state.move_end(),
        _ => {}
    }
}

/// Inline status for the field: the validation error wins over the key hint.
fn status_line(state: &KeyEntryState) -> Option<(Severity, String)> {
    if let Some(error) = state.error() {
        return Some((Severity::Error, error.to_string()));
    }
    state.key_hint().map(|hint| (Severity::Warning, hint))
}

/// Renders the field as one mask char per key char and places the terminal
/// cursor when focused. Returns the horizontal scroll applied, in chars.
fn render_masked_input(frame: &mut Frame, area: Rect, state: &KeyEntryState, theme: &dyn Theme, focused: bool) -> usize {
    let block = th::block(theme, None, focused).border_style(if state.error().is_some() {
        theme.status_error()
    } else {
        theme.border_style(focused)
    });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buffer = state.buffer();
    let (visible, scroll) = visible_mask(buffer.char_count(), buffer.cursor_chars(), inner.width as usize);
    let content = if buffer.input().is_empty() {
        Span::styled(PLACEHOLDER, theme.text_muted_style())
    } else {
        Span::styled(visible, th::input_style(theme, state.error().is_none(), focused))
    };
    frame.render_widget(Paragraph::new(Line::from(content)), inner);

    if focused && inner.width > 0 {
        let column = (buffer.cursor_chars() - scroll) as u16;
        frame.set_cursor_position((inner.x + column.min(inner.width - 1), inner.y));
    }
    scroll
}

/// Mask string for a field `width` columns wide, scrolled so the cursor stays
/// visible. Returns the mask and the number of chars scrolled off the left.
fn visible_mask(char_count: usize, cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let scroll = (cursor + 1).saturating_sub(width);
    let shown = char_count.saturating_sub(scroll).min(width);
    (MASK_CHAR.to_string().repeat(shown), scroll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::key_entry::KeyEntryForm;
    use crate::ui::theme::{LoadedTheme, ThemeId};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn app_with(initial: &str) -> (App<'static>, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let form = KeyEntryForm::new(initial, move |key| sink.borrow_mut().push(key));
        (App::new(form, LoadedTheme::from_id(ThemeId::Nord)), calls)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(component: &mut KeyEntryComponent, app: &mut App<'_>, text: &str) {
        for c in text.chars() {
            component.handle_key_events(app, key(KeyCode::Char(c)));
        }
    }

    fn render_to_text(component: &mut KeyEntryComponent, app: &mut App<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(PANEL_WIDTH, PANEL_HEIGHT)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                component.render(frame, area, app);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn typing_then_enter_submits_trimmed_key() {
        let (mut app, calls) = app_with("");
        let mut component = KeyEntryComponent::default();
        type_text(&mut component, &mut app, "  AIzaXYZ  ");
        let effects = component.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(effects, vec![Effect::Submitted]);
        assert_eq!(*calls.borrow(), vec!["AIzaXYZ".to_string()]);
    }

    #[test]
    fn enter_on_empty_field_shows_error_without_callback() {
        let (mut app, calls) = app_with("");
        let mut component = KeyEntryComponent::default();
        let effects = component.handle_key_events(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(calls.borrow().is_empty());
        assert!(app.form.state().error().is_some());

        let text = render_to_text(&mut component, &mut app);
        assert!(text.contains("Enter an API key (Gemini)"));
    }

    #[test]
    fn typing_after_error_clears_it() {
        let (mut app, _) = app_with("");
        let mut component = KeyEntryComponent::default();
        component.handle_key_events(&mut app, key(KeyCode::Enter));
        type_text(&mut component, &mut app, "A");
        assert!(app.form.state().error().is_none());
    }

    #[test]
    fn navigation_on_empty_field_keeps_the_error() {
        let (mut app, _) = app_with("");
        let mut component = KeyEntryComponent::default();
        component.handle_key_events(&mut app, key(KeyCode::Enter));
        for code in [KeyCode::Left, KeyCode::Home, KeyCode::End, KeyCode::Backspace, KeyCode::Delete] {
            component.handle_key_events(&mut app, key(code));
        }
        assert_eq!(app.form.state().error(), Some("Enter an API key (Gemini)"));

        let text = render_to_text(&mut component, &mut app);
        assert!(text.contains("Enter an API key (Gemini)"));

        let area = component.layout.input_area;
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + 2,
            row: area.y + 1,
            modifiers: KeyModifiers::NONE,
        };
        component.handle_mouse_events(&mut app, click);
        assert!(app.form.state().error().is_some());
    }

    #[test]
    fn space_on_focused_button_submits() {
        let (mut app, calls) = app_with("AIzaBUTTON");
        let mut component = KeyEntryComponent::default();
        component.handle_key_events(&mut app, key(KeyCode::Tab));
        assert!(app.submit_focused());
        let effects = component.handle_key_events(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(effects, vec![Effect::Submitted]);
        assert_eq!(*calls.borrow(), vec!["AIzaBUTTON".to_string()]);
        assert_eq!(app.form.state().input(), "AIzaBUTTON");
    }

    #[test]
    fn typing_while_button_focused_leaves_field_alone() {
        let (mut app, _) = app_with("AIza");
        let mut component = KeyEntryComponent::default();
        component.handle_key_events(&mut app, key(KeyCode::BackTab));
        assert!(app.submit_focused());
        type_text(&mut component, &mut app, "zz");
        assert_eq!(app.form.state().input(), "AIza");
    }

    #[test]
    fn escape_cancels_without_callback() {
        let (mut app, calls) = app_with("AIzaXYZ");
        let mut component = KeyEntryComponent::default();
        let effects = component.handle_key_events(&mut app, key(KeyCode::Esc));
        assert_eq!(effects, vec![Effect::Cancel]);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn ctrl_u_clears_the_field() {
        let (mut app, _) = app_with("AIzaXYZ");
        let mut component = KeyEntryComponent::default();
        component.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(app.form.state().input(), "");
    }

    #[test]
    fn paste_inserts_into_field() {
        let (mut app, _) = app_with("");
        let mut component = KeyEntryComponent::default();
        component.handle_message(&mut app, Msg::Paste("AIzaPASTED\n".to_string()));
        assert_eq!(app.form.state().input(), "AIzaPASTED");
        assert!(app.input_focused());
    }

    #[test]
    fn rendered_field_is_masked() {
        let (mut app, _) = app_with("AIzaSECRET");
        let mut component = KeyEntryComponent::default();
        let text = render_to_text(&mut component, &mut app);
        assert!(text.contains(TITLE));
        assert!(text.contains(FIELD_LABEL));
        assert!(text.contains(SUBMIT_LABEL));
        assert!(text.contains(API_KEY_URL));
        assert!(text.contains(&"•".repeat(10)));
        assert!(!text.contains("SECRET"));
    }

    #[test]
    fn empty_field_shows_placeholder() {
        let (mut app, _) = app_with("");
        let mut component = KeyEntryComponent::default();
        let text = render_to_text(&mut component, &mut app);
        assert!(text.contains(PLACEHOLDER));
    }

    #[test]
    fn unexpected_prefix_shows_hint() {
        let (mut app, _) = app_with("sk-123");
        let mut component = KeyEntryComponent::default();
        let text = render_to_text(&mut component, &mut app);
        assert!(text.contains("usually start with"));
    }

    #[test]
    fn clicking_the_button_submits() {
        let (mut app, calls) = app_with("AIzaCLICK");
        let mut component = KeyEntryComponent::default();
        render_to_text(&mut component, &mut app);
        let area = component.layout.submit_area;
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + 1,
            row: area.y + 1,
            modifiers: KeyModifiers::NONE,
        };
        let effects = component.handle_mouse_events(&mut app, click);
        assert_eq!(effects, vec![Effect::Submitted]);
        assert_eq!(*calls.borrow(), vec!["AIzaCLICK".to_string()]);
    }

    #[test]
    fn clicking_the_field_moves_the_cursor() {
        let (mut app, _) = app_with("AIzaCLICK");
        let mut component = KeyEntryComponent::default();
        component.handle_key_events(&mut app, key(KeyCode::Tab));
        render_to_text(&mut component, &mut app);
        let area = component.layout.input_area;
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + 3,
            row: area.y + 1,
            modifiers: KeyModifiers::NONE,
        };
        component.handle_mouse_events(&mut app, click);
        assert!(app.input_focused());
        assert_eq!(app.form.state().buffer().cursor_chars(), 2);
    }

    #[test]
    fn visible_mask_scrolls_to_keep_cursor_in_view() {
        assert_eq!(visible_mask(3, 3, 10), ("•••".to_string(), 0));
        let (mask, scroll) = visible_mask(20, 20, 10);
        assert_eq!(scroll, 11);
        assert_eq!(mask.chars().count(), 9);
        let (mask, scroll) = visible_mask(20, 0, 10);
        assert_eq!(scroll, 0);
        assert_eq!(mask.chars().count(), 10);
    }
}

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for input fields; caller sets the block border based on focus.
pub fn input_style<T: Theme + ?Sized>(theme: &T, valid: bool, focused: bool) -> Style {
    let ThemeRoles { surface, text, error, .. } = *theme.roles();
    let mut style = Style::default().bg(surface).fg(text);
    if !valid {
        style = style.fg(error);
    }
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Darken an RGB color by a multiplicative factor (0.0..=1.0).
/// If the color is not RGB, returns it unchanged.
pub fn darken_rgb(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let f = factor.clamp(0.0, 1.0);
            let dr = (r as f32 * f).round().clamp(0.0, 255.0) as u8;
            let dg = (g as f32 * f).round().clamp(0.0, 255.0) as u8;
            let db = (b as f32 * f).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(dr, dg, db)
        }
        other => other,
    }
}

/// Move an RGB color towards white by `amount` (0.0..=1.0).
pub fn lighten_rgb(color: Color, amount: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let a = amount.clamp(0.0, 1.0);
            let lift = |channel: u8| (channel as f32 + (255.0 - channel as f32) * a).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(lift(r), lift(g), lift(b))
        }
        other => other,
    }
}

/// Rendering switches for [`render_button`].
#[derive(Debug, Clone, Copy)]
pub struct ButtonRenderOptions {
    pub enabled: bool,
    pub focused: bool,
    pub borders: Borders,
}

impl ButtonRenderOptions {
    pub fn new(enabled: bool, focused: bool, borders: Borders) -> Self {
        Self {
            enabled,
            focused,
            borders,
        }
    }
}

/// Primary button style (filled accent background).
pub fn button_primary_style<T: Theme + ?Sized>(theme: &T, enabled: bool, focused: bool) -> Style {
    if !enabled {
        let ThemeRoles {
            surface_muted, text_muted, ..
        } = *theme.roles();
        return Style::default().bg(surface_muted).fg(text_muted);
    }
    let ThemeRoles {
        accent_primary,
        selection_bg,
        background,
        ..
    } = *theme.roles();
    let bg = if focused { accent_primary } else { selection_bg };
    let fg = if focused { background } else { accent_primary };
    Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
}

/// Renders a primary button.
pub fn render_button<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, label: &str, theme: &T, options: ButtonRenderOptions) {
    let ButtonRenderOptions {
        enabled,
        focused,
        borders,
    } = options;
    let border_style = if enabled {
        theme.border_style(focused)
    } else {
        theme.text_muted_style()
    };

    let padding = if borders.is_empty() {
        Padding::uniform(1) // Add padding when no borders to match bordered button size
    } else {
        Padding::uniform(0)
    };

    frame.render_widget(
        Paragraph::new(label).centered().block(
            Block::bordered()
                .borders(borders)
                .border_style(border_style)
                .padding(padding),
        )
        .style(button_primary_style(theme, enabled, focused)),
        area,
    );
}

/// Build hint-bar spans: each key is emphasised, each description muted.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    hints
        .iter()
        .flat_map(|(key, description)| {
            [
                Span::styled(*key, theme.accent_emphasis_style()),
                Span::styled(*description, theme.text_muted_style()),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darken_scales_rgb_channels() {
        assert_eq!(darken_rgb(Color::Rgb(100, 200, 50), 0.5), Color::Rgb(50, 100, 25));
        assert_eq!(darken_rgb(Color::Indexed(12), 0.5), Color::Indexed(12));
    }

    #[test]
    fn focused_primary_button_inverts_accent() {
        let theme = crate::ui::theme::NordTheme::new();
        let roles = theme.roles().clone();
        let focused = button_primary_style(&theme, true, true);
        assert_eq!(focused.bg, Some(roles.accent_primary));
        assert_eq!(focused.fg, Some(roles.background));
        let idle = button_primary_style(&theme, true, false);
        assert_eq!(idle.bg, Some(roles.selection_bg));
        let disabled = button_primary_style(&theme, false, true);
        assert_eq!(disabled.fg, Some(roles.text_muted));
    }

    #[test]
    fn lighten_moves_towards_white() {
        assert_eq!(lighten_rgb(Color::Rgb(0, 100, 255), 0.5), Color::Rgb(128, 178, 255));
        assert_eq!(lighten_rgb(Color::Reset, 0.5), Color::Reset);
    }
}

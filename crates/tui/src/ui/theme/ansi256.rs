//! ANSI 256-color fallback theme tailored for terminals without truecolor support.
//!
//! Approximates the Nord palette with indexed colors so the form stays
//! legible inside macOS Terminal and other 8-bit color terminals.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

#[derive(Debug, Clone)]
pub struct Ansi256Theme {
    roles: ThemeRoles,
}

impl Ansi256Theme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: Color::Indexed(236),
                surface: Color::Indexed(236),
                surface_muted: Color::Indexed(239),
                border: Color::Indexed(240),

                text: Color::Indexed(255),
                text_secondary: Color::Indexed(250),
                text_muted: Color::Indexed(245),

                accent_primary: Color::Indexed(110),
                accent_secondary: Color::Indexed(109),

                warning: Color::Indexed(173),
                error: Color::Indexed(167),

                selection_bg: Color::Indexed(239),
                focus: Color::Indexed(110),
            },
        }
    }
}

impl Theme for Ansi256Theme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}

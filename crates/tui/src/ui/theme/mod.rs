//! Theme styling module for the TUI UI layer.
//!
//! Defines the Nord and Dracula palettes, an ANSI 256-color fallback, semantic
//! theme roles, and helper builders for Ratatui widgets and styles. Prefer
//! these helpers over hard-coding colors.

use std::env;

use tracing::debug;

pub mod ansi256;
pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use ansi256::Ansi256Theme;
pub use dracula::DraculaTheme;
pub use nord::{NordTheme, NordThemeHighContrast};
pub use roles::Theme;

/// Environment variable naming the preferred theme.
pub const THEME_ENV: &str = "TUI_THEME";

/// Themes selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeId {
    Nord,
    NordHighContrast,
    Dracula,
    Ansi256,
}

impl ThemeId {
    /// Resolve a user-supplied theme name; case and `-`/`_` are ignored.
    pub fn resolve(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "nord" => Some(Self::Nord),
            "nord_high_contrast" | "nord_hc" => Some(Self::NordHighContrast),
            "dracula" => Some(Self::Dracula),
            "ansi256" | "ansi" => Some(Self::Ansi256),
            _ => None,
        }
    }

    pub fn build(self) -> Box<dyn Theme> {
        match self {
            Self::Nord => Box::new(NordTheme::new()),
            Self::NordHighContrast => Box::new(NordThemeHighContrast::new()),
            Self::Dracula => Box::new(DraculaTheme::new()),
            Self::Ansi256 => Box::new(Ansi256Theme::new()),
        }
    }
}

/// Theme plus the identifier it was built from.
pub struct LoadedTheme {
    pub id: ThemeId,
    pub theme: Box<dyn Theme>,
}

impl LoadedTheme {
    pub fn from_id(id: ThemeId) -> Self {
        Self { id, theme: id.build() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorCapability {
    Truecolor,
    Ansi256,
}

/// Selects a theme from terminal capabilities, an explicit preference (for
/// example a CLI flag), and `TUI_THEME`, in that order of precedence.
pub fn load(preferred_theme: Option<&str>) -> LoadedTheme {
    let capability = detect_color_capability();
    if matches!(capability, ColorCapability::Ansi256) {
        debug!("ANSI-only terminal detected; ignoring theme overrides and forcing fallback palette.");
        return LoadedTheme::from_id(ThemeId::Ansi256);
    }

    if let Some(name) = preferred_theme
        && let Some(id) = ThemeId::resolve(name)
    {
        return LoadedTheme::from_id(id);
    }

    if let Ok(theme_name) = env::var(THEME_ENV)
        && let Some(id) = ThemeId::resolve(&theme_name)
    {
        return LoadedTheme::from_id(id);
    }

    LoadedTheme::from_id(ThemeId::Nord)
}

fn detect_color_capability() -> ColorCapability {
    if let Some(mode) = env::var("TUI_COLOR_MODE").ok().and_then(|value| parse_color_mode(value.trim())) {
        return mode;
    }

    if env::var("TUI_FORCE_TRUECOLOR")
        .ok()
        .map(|value| is_truthy(value.trim()))
        .unwrap_or(false)
    {
        return ColorCapability::Truecolor;
    }

    let color_term = env::var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
    if color_term.contains("truecolor") || color_term.contains("24bit") {
        return ColorCapability::Truecolor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term.contains("truecolor") {
        return ColorCapability::Truecolor;
    }

    ColorCapability::Ansi256
}

fn parse_color_mode(value: &str) -> Option<ColorCapability> {
    match value.to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" => Some(ColorCapability::Truecolor),
        "ansi256" | "256" | "8bit" => Some(ColorCapability::Ansi256),
        _ => None,
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enable" | "enabled"
    )
}

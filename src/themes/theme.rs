//! Theme structure and application
//!
//! Semantic color system: colors are organized by purpose, not by color name.

use ratatui::style::Color;

use crate::session::ApiStatus;

/// Theme colors with semantic organization
#[derive(Clone, Debug)]
pub struct Theme {
    // ─────────────────────────────────────────────────────────────────────────
    // Surfaces - Background layers
    // ─────────────────────────────────────────────────────────────────────────
    /// Main background color
    pub background: Color,
    /// Card/panel background (slightly elevated)
    pub surface: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Text - Foreground colors
    // ─────────────────────────────────────────────────────────────────────────
    /// Primary text - headers, active items, important content
    pub text_primary: Color,
    /// Secondary text - descriptions, labels, less important
    pub text_secondary: Color,
    /// Muted text - hints, disabled states, timestamps
    pub text_muted: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Accents - Brand/highlight colors
    // ─────────────────────────────────────────────────────────────────────────
    /// Primary accent (indigo)
    pub accent: Color,
    /// Secondary accent - gradient pair (violet)
    pub accent_secondary: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Semantic - Status colors
    // ─────────────────────────────────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // ─────────────────────────────────────────────────────────────────────────
    // Borders - Edge colors
    // ─────────────────────────────────────────────────────────────────────────
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Default dark theme
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(30, 32, 44),
            surface: Color::Rgb(40, 43, 58),

            text_primary: Color::Rgb(240, 240, 245),
            text_secondary: Color::Rgb(175, 178, 190),
            text_muted: Color::Rgb(120, 123, 135),

            accent: Color::Rgb(102, 126, 234),          // #667eea
            accent_secondary: Color::Rgb(118, 75, 162), // #764ba2

            success: Color::Rgb(76, 175, 80),
            warning: Color::Rgb(255, 152, 0),
            error: Color::Rgb(244, 67, 54),
            info: Color::Rgb(137, 180, 250),

            border: Color::Rgb(62, 66, 84),
            border_focused: Color::Rgb(102, 126, 234),
        }
    }

    /// Dark theme with the accent taken from `SYMPTOM_ACCENT` (`#rrggbb`)
    /// when set and valid
    pub fn load() -> Self {
        let mut theme = Self::default();
        if let Some(accent) = std::env::var("SYMPTOM_ACCENT")
            .ok()
            .and_then(|hex| Self::hex_to_color(&hex))
        {
            theme.accent = accent;
            theme.border_focused = accent;
        }
        theme
    }

    /// Convert hex string to Color
    pub fn hex_to_color(hex: &str) -> Option<Color> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color::Rgb(r, g, b))
    }

    /// Color for the API health indicator
    pub fn status_color(&self, status: ApiStatus) -> Color {
        match status {
            ApiStatus::Healthy => self.success,
            ApiStatus::Checking => self.info,
            ApiStatus::Error => self.error,
        }
    }

    /// Get status dot character
    pub fn status_dot(&self, status: ApiStatus) -> &'static str {
        match status {
            ApiStatus::Healthy => "●",
            ApiStatus::Checking => "◌",
            ApiStatus::Error => "○",
        }
    }
}

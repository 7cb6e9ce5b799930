//! Separator glyphs and small text helpers for consistent styling

/// Separator characters for visual hierarchy
pub struct Separators;

impl Separators {
    /// Medium horizontal line with dots
    pub const DOTTED: &'static str = "┄";

    /// Bullet point
    pub const BULLET: &'static str = "•";

    /// Arrow right
    pub const ARROW_RIGHT: &'static str = "→";

    /// Warning sign for banners
    pub const WARNING: &'static str = "⚠";

    /// Diamond (for branding)
    pub const DIAMOND: &'static str = "◆";

    /// Vertical bar (for cursor)
    pub const CURSOR: &'static str = "│";

    /// Filled bar cell
    pub const BAR_FILLED: &'static str = "█";

    /// Empty bar cell
    pub const BAR_EMPTY: &'static str = "░";
}

/// Horizontal rule of the given width
pub fn rule(width: usize) -> String {
    Separators::DOTTED.repeat(width)
}

/// Shorten `text` to at most `max` characters, marking the cut with "..."
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

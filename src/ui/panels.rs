//! Reusable panel components
//!
//! Provides styled panels with consistent theming and a fill bar.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Widget};

use crate::themes::Theme;
use crate::ui::borders::Separators;

/// Panel style variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelStyle {
    /// Default panel style
    #[default]
    Default,
    /// Focused panel (highlighted border)
    Focused,
    /// Elevated panel (cards)
    Elevated,
    /// Error state
    Error,
    /// Muted/disabled state
    Muted,
}

/// A styled panel component
#[derive(Clone)]
pub struct Panel<'a> {
    title: Option<&'a str>,
    style: PanelStyle,
    theme: &'a Theme,
    padding: Padding,
    borders: Borders,
}

impl<'a> Panel<'a> {
    /// Create a new panel with the given theme
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            title: None,
            style: PanelStyle::Default,
            theme,
            padding: Padding::horizontal(1),
            borders: Borders::ALL,
        }
    }

    /// Set the panel title
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the panel style
    pub fn style(mut self, style: PanelStyle) -> Self {
        self.style = style;
        self
    }

    /// Set focused style
    pub fn focused(mut self, focused: bool) -> Self {
        if focused {
            self.style = PanelStyle::Focused;
        }
        self
    }

    /// Set no padding
    pub fn no_padding(mut self) -> Self {
        self.padding = Padding::ZERO;
        self
    }

    /// Set borders
    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    /// Build the Block widget
    pub fn block(&self) -> Block<'a> {
        let border_color = match self.style {
            PanelStyle::Default => self.theme.border,
            PanelStyle::Focused => self.theme.border_focused,
            PanelStyle::Elevated => self.theme.accent_secondary,
            PanelStyle::Error => self.theme.error,
            PanelStyle::Muted => self.theme.text_muted,
        };

        let title_color = match self.style {
            PanelStyle::Default => self.theme.text_secondary,
            PanelStyle::Focused | PanelStyle::Elevated => self.theme.accent,
            PanelStyle::Error => self.theme.error,
            PanelStyle::Muted => self.theme.text_muted,
        };

        let mut block = Block::default()
            .borders(self.borders)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .padding(self.padding);

        if let Some(title) = self.title {
            block = block
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(title_color).bold());
        }

        block
    }
}

/// Horizontal fill bar in a fixed color
pub struct FillBar {
    ratio: f64,
    color: Color,
    track: Color,
}

impl FillBar {
    /// Create a bar filled to `ratio` (clamped to 0..=1)
    pub fn new(ratio: f64, color: Color, track: Color) -> Self {
        let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
        Self { ratio, color, track }
    }

    /// Number of filled cells for a bar `width` cells wide
    pub fn filled_cells(&self, width: u16) -> u16 {
        ((width as f64) * self.ratio).round() as u16
    }
}

impl Widget for FillBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }

        let filled = self.filled_cells(area.width).min(area.width);
        let empty = area.width - filled;

        let filled_area = Rect::new(area.x, area.y, filled, 1);
        Paragraph::new(Separators::BAR_FILLED.repeat(filled as usize))
            .style(Style::default().fg(self.color))
            .render(filled_area, buf);

        let empty_area = Rect::new(area.x + filled, area.y, empty, 1);
        Paragraph::new(Separators::BAR_EMPTY.repeat(empty as usize))
            .style(Style::default().fg(self.track))
            .render(empty_area, buf);
    }
}

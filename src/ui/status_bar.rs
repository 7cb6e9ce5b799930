//! Status bar component
//!
//! Bottom status bar showing API health, key hints and the clock. On narrow
//! terminals the URL, then the clock, then the long brand are dropped so the
//! key hints stay on screen.

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use crate::session::ApiStatus;
use crate::themes::Theme;
use crate::ui::borders::Separators;

/// Key hint for display in the status bar
#[derive(Clone, Debug)]
pub struct KeyHint {
    pub key: String,
    pub label: String,
    pub enabled: bool,
}

/// Status bar widget
pub struct StatusBar<'a> {
    theme: &'a Theme,
    api_status: ApiStatus,
    api_url: &'a str,
    hints: Vec<KeyHint>,
}

/// Progressively tighter layouts, widest first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Density {
    Full,
    NoUrl,
    NoClock,
    Compact,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar
    pub fn new(theme: &'a Theme, api_status: ApiStatus, api_url: &'a str) -> Self {
        Self {
            theme,
            api_status,
            api_url,
            hints: Vec::new(),
        }
    }

    /// Add a key hint; disabled hints are dimmed
    pub fn hint(mut self, key: impl Into<String>, label: impl Into<String>, enabled: bool) -> Self {
        self.hints.push(KeyHint {
            key: key.into(),
            label: label.into(),
            enabled,
        });
        self
    }

    fn separator(&self) -> Span<'a> {
        Span::styled(" │ ", Style::default().fg(self.theme.border))
    }

    /// Build the widest status line that fits in `width` columns
    pub fn build_content(&self, width: u16) -> Line<'a> {
        let mut line = self.compose(Density::Full);
        for density in [Density::NoUrl, Density::NoClock, Density::Compact] {
            if line.width() <= width as usize {
                break;
            }
            line = self.compose(density);
        }
        line
    }

    fn compose(&self, density: Density) -> Line<'a> {
        let mut spans = Vec::new();

        // Logo
        let logo = if density < Density::Compact {
            format!("{} SYMPTOM CLASSIFIER", Separators::DIAMOND)
        } else {
            Separators::DIAMOND.to_string()
        };
        spans.push(Span::styled(
            logo,
            Style::default().fg(self.theme.accent).bold(),
        ));
        spans.push(self.separator());

        // API health
        let color = self.theme.status_color(self.api_status);
        if density < Density::Compact {
            spans.push(Span::styled(
                "API: ",
                Style::default().fg(self.theme.text_secondary),
            ));
        }
        spans.push(Span::styled(
            format!("{} {}", self.theme.status_dot(self.api_status), self.api_status.label()),
            Style::default().fg(color),
        ));
        if density == Density::Full {
            spans.push(Span::styled(
                format!(" ({})", self.api_url),
                Style::default().fg(self.theme.text_muted),
            ));
        }

        // Key hints
        if !self.hints.is_empty() {
            spans.push(self.separator());
        }
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(if density < Density::Compact { "  " } else { " " }));
            }
            let (key_style, label_style) = if hint.enabled {
                (
                    Style::default().fg(self.theme.accent).bold(),
                    Style::default().fg(self.theme.text_secondary),
                )
            } else {
                (
                    Style::default().fg(self.theme.text_muted).dim(),
                    Style::default().fg(self.theme.text_muted).dim(),
                )
            };
            spans.push(Span::styled(format!("[{}]", hint.key), key_style));
            spans.push(Span::styled(format!(" {}", hint.label), label_style));
        }

        // Time
        if density < Density::NoClock {
            spans.push(self.separator());
            spans.push(Span::styled(
                Local::now().format("%H:%M:%S").to_string(),
                Style::default().fg(self.theme.text_muted),
            ));
        }

        Line::from(spans)
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.surface));
        let content = self.build_content(area.width);
        Paragraph::new(content).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_content_lists_health_and_hints() {
        let theme = Theme::default();
        let line = StatusBar::new(&theme, ApiStatus::Healthy, "http://localhost:5000")
            .hint("Enter", "Predict", true)
            .hint("Ctrl+L", "Clear", false)
            .build_content(200);
        let text = line_text(&line);
        assert!(text.contains("● connected"));
        assert!(text.contains("http://localhost:5000"));
        assert!(text.contains("[Enter] Predict"));
        assert!(text.contains("[Ctrl+L] Clear"));
    }

    #[test]
    fn test_disabled_hint_is_muted() {
        let theme = Theme::default();
        let line = StatusBar::new(&theme, ApiStatus::Error, "http://x")
            .hint("Enter", "Predict", false)
            .build_content(200);
        let key_span = line
            .spans
            .iter()
            .find(|s| s.content == "[Enter]")
            .unwrap();
        assert_eq!(key_span.style.fg, Some(theme.text_muted));
        let health = line.spans.iter().find(|s| s.content.contains("disconnected")).unwrap();
        assert_eq!(health.style.fg, Some(theme.error));
    }

    #[test]
    fn test_narrow_width_keeps_hints() {
        let theme = Theme::default();
        let bar = StatusBar::new(&theme, ApiStatus::Error, "http://classifier.internal:5000")
            .hint("Enter", "Predict", false)
            .hint("F1-F4", "Examples", false)
            .hint("Ctrl+L", "Clear", true)
            .hint("Esc", "Quit", true);

        let wide = line_text(&bar.build_content(200));
        assert!(wide.contains("SYMPTOM CLASSIFIER"));
        assert!(wide.contains("http://classifier.internal:5000"));

        let line = bar.build_content(80);
        let narrow = line_text(&line);
        assert!(line.width() <= 80);
        assert!(!narrow.contains("http://classifier.internal:5000"));
        assert!(narrow.contains("○ disconnected"));
        assert!(narrow.contains("[Esc] Quit"));
    }

    #[test]
    fn test_render_at_80_columns_shows_last_hint() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&theme, ApiStatus::Healthy, "http://localhost:5000")
            .hint("Enter", "Predict", true)
            .hint("F1-F4", "Examples", true)
            .hint("Ctrl+L", "Clear", true)
            .hint("Esc", "Quit", true)
            .render(area, &mut buf);
        let row: String = (0..80).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(row.contains("[Esc] Quit"));
    }
}

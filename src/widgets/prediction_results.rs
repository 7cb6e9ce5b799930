//! Prediction results widget - one card per model with a confidence bar

use chrono::{DateTime, Local};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::api::{ModelPrediction, PredictionResult};
use crate::themes::Theme;
use crate::ui::borders::Separators;
use crate::ui::panels::{FillBar, Panel, PanelStyle};

const CARD_HEIGHT: u16 = 5;
const MIN_CARD_WIDTH: u16 = 28;
const MAX_SUMMARY_LINES: u16 = 4;

/// Confidence classification with fixed thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Self::High
        } else if confidence >= 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Green, orange or red
    pub fn color(&self) -> Color {
        match self {
            Self::High => Color::Rgb(76, 175, 80),
            Self::Medium => Color::Rgb(255, 152, 0),
            Self::Low => Color::Rgb(244, 67, 54),
        }
    }
}

/// Confidence as a percentage with two decimals
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// Renders a prediction result; renders nothing when there is no result or
/// the result carries no predictions.
///
/// Card rows that do not fit are reachable through `scroll`, and the heading
/// counts the cards currently out of view.
pub struct PredictionResults<'a> {
    results: Option<&'a PredictionResult>,
    answered_at: Option<DateTime<Local>>,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> PredictionResults<'a> {
    pub fn new(results: Option<&'a PredictionResult>, theme: &'a Theme) -> Self {
        Self {
            results,
            answered_at: None,
            scroll: 0,
            theme,
        }
    }

    /// Skip the first `rows` card rows
    pub fn scroll(mut self, rows: usize) -> Self {
        self.scroll = rows;
        self
    }

    pub fn answered_at(mut self, at: Option<DateTime<Local>>) -> Self {
        self.answered_at = at;
        self
    }

    fn predictions(&self) -> Option<Vec<&'a ModelPrediction>> {
        let results = self.results?;
        results.entries().map(|entries| entries.map(|(_, p)| p).collect())
    }

    fn summary_lines(&self) -> u16 {
        let lines = self
            .results
            .map(|r| r.symptoms.lines().count().max(1))
            .unwrap_or(1);
        (lines as u16).min(MAX_SUMMARY_LINES)
    }

    fn columns(width: u16) -> u16 {
        (width / MIN_CARD_WIDTH).max(1)
    }

    fn chrome_height(&self) -> u16 {
        // summary block with borders, heading
        (self.summary_lines() + 2) + 2
    }

    fn card_rows(count: usize, width: u16) -> usize {
        count.div_ceil(Self::columns(width) as usize)
    }

    /// Rows needed to show everything at `width`; zero when nothing renders
    pub fn required_height(&self, width: u16) -> u16 {
        let Some(predictions) = self.predictions() else {
            return 0;
        };
        let card_rows = Self::card_rows(predictions.len(), width) as u16;
        self.chrome_height() + card_rows * CARD_HEIGHT
    }

    /// Largest scroll offset that still changes what an `area` shows
    pub fn max_scroll(&self, area: Rect) -> usize {
        let Some(predictions) = self.predictions() else {
            return 0;
        };
        let visible = (area.height.saturating_sub(self.chrome_height()) / CARD_HEIGHT) as usize;
        Self::card_rows(predictions.len(), area.width).saturating_sub(visible.max(1))
    }

    fn render_summary(&self, results: &PredictionResult, area: Rect, buf: &mut Buffer) {
        let panel = Panel::new(self.theme).title("Analyzed Symptoms");
        let block = panel.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = results
            .symptoms
            .lines()
            .map(|l| Line::styled(l.to_string(), Style::default().fg(self.theme.text_secondary)))
            .collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn render_heading(&self, area: Rect, buf: &mut Buffer, hidden: usize) {
        let mut spans = vec![Span::styled(
            "Prediction Results",
            Style::default().fg(self.theme.text_primary).bold(),
        )];
        if let Some(at) = self.answered_at {
            spans.push(Span::styled(
                format!("  {} {}", Separators::BULLET, at.format("%H:%M:%S")),
                Style::default().fg(self.theme.text_muted),
            ));
        }
        if hidden > 0 {
            spans.push(Span::styled(
                format!("  +{} more (PgUp/PgDn)", hidden),
                Style::default().fg(self.theme.warning),
            ));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn render_card(&self, prediction: &ModelPrediction, area: Rect, buf: &mut Buffer) {
        let tier_color = ConfidenceTier::from_confidence(prediction.confidence).color();
        let panel = Panel::new(self.theme)
            .title(&prediction.model_name)
            .style(PanelStyle::Elevated);
        let block = panel.block();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width == 0 {
            return;
        }
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{} ", Separators::ARROW_RIGHT),
                Style::default().fg(self.theme.text_muted),
            ),
            Span::styled(
                prediction.disease.as_str(),
                Style::default().fg(self.theme.text_primary).bold(),
            ),
        ]))
        .render(rows[0], buf);

        let label = "Confidence:";
        let pct = format_confidence(prediction.confidence);
        let gap = (rows[1].width as usize).saturating_sub(label.len() + pct.len());
        Paragraph::new(Line::from(vec![
            Span::styled(label, Style::default().fg(self.theme.text_secondary)),
            Span::raw(" ".repeat(gap)),
            Span::styled(pct, Style::default().fg(tier_color).bold()),
        ]))
        .render(rows[1], buf);

        FillBar::new(prediction.confidence, tier_color, self.theme.border).render(rows[2], buf);
    }
}

impl Widget for PredictionResults<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (Some(results), Some(predictions)) = (self.results, self.predictions()) else {
            return;
        };

        let [summary_area, heading_area, cards_area] = Layout::vertical([
            Constraint::Length(self.summary_lines() + 2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .areas(area);

        let columns = Self::columns(cards_area.width);
        let visible_rows = (cards_area.height / CARD_HEIGHT) as usize;
        let total_rows = Self::card_rows(predictions.len(), cards_area.width);
        let first_row = self.scroll.min(total_rows.saturating_sub(visible_rows.max(1)));
        let shown: Vec<_> = predictions
            .iter()
            .skip(first_row * columns as usize)
            .take(visible_rows * columns as usize)
            .collect();

        self.render_summary(results, summary_area, buf);
        self.render_heading(heading_area, buf, predictions.len() - shown.len());

        let card_width = cards_area.width / columns;
        for (i, prediction) in shown.into_iter().enumerate() {
            let col = i as u16 % columns;
            let row = i as u16 / columns;
            let y = cards_area.y + row * CARD_HEIGHT;
            let card_area = Rect::new(cards_area.x + col * card_width, y, card_width, CARD_HEIGHT);
            self.render_card(prediction, card_area, buf);
        }
    }
}

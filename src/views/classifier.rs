//! Classifier view - symptom input, per-model predictions and model catalog
//!
//! Requests run as spawned tasks and report back through an mpsc channel
//! that the event loop drains every tick. Only one prediction is in flight
//! at a time; the session drops any answer tagged with an older generation
//! and dropping the view aborts whatever is still running.

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::{ViewAction, ViewTrait};
use crate::api::{self, ModelCatalog, PredictionResult, PredictionService};
use crate::session::{connectivity_message, ApiStatus, PredictTicket, Session, EXAMPLE_SYMPTOMS};
use crate::themes::Theme;
use crate::ui::borders::{rule, truncate_with_ellipsis, Separators};
use crate::ui::{Panel, PanelStyle, Spinner, StatusBar};
use crate::widgets::{ModelInfo, PredictionResults};

const PLACEHOLDER: &str =
    "Describe the symptoms (e.g., fever, cough, headache, difficulty breathing...)";
const EXAMPLE_LABEL_WIDTH: usize = 40;
const EXAMPLES_PREFIX: &str = "Quick Examples: ";
const INPUT_HEIGHT: u16 = 5;
// header, examples, divider, status bar
const CHROME_HEIGHT: u16 = 3 + 2 + 1 + 1;

/// Outcome of a background request
#[derive(Debug)]
pub enum ServiceEvent {
    Health(bool),
    Catalog(api::Result<ModelCatalog>),
    Prediction {
        generation: u64,
        result: api::Result<PredictionResult>,
    },
}

/// Classifier view - the whole interactive screen
pub struct ClassifierView<S: PredictionService> {
    service: Arc<S>,
    session: Session,
    model_info: ModelInfo,
    theme: Theme,
    spinner: Spinner,
    events_tx: mpsc::UnboundedSender<ServiceEvent>,
    events_rx: mpsc::UnboundedReceiver<ServiceEvent>,
    in_flight: Option<JoinHandle<()>>,
    catalog_requested: bool,
    /// Card rows scrolled past in the results pane
    results_scroll: usize,
}

impl<S: PredictionService> ClassifierView<S> {
    pub fn new(service: S, api_url: impl Into<String>, theme: Theme) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service: Arc::new(service),
            session: Session::new(api_url),
            model_info: ModelInfo::new(),
            theme,
            spinner: Spinner::default(),
            events_tx,
            events_rx,
            in_flight: None,
            catalog_requested: false,
            results_scroll: 0,
        }
    }

    /// Fire the one-shot health check. Must run inside a tokio runtime.
    pub fn mount(&mut self) {
        info!("Checking API health at {}", self.session.api_url());
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let healthy = service.check_health().await.is_ok();
            let _ = tx.send(ServiceEvent::Health(healthy));
        });
    }

    fn fetch_catalog(&mut self) {
        if self.catalog_requested {
            return;
        }
        self.catalog_requested = true;
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = service.get_models().await;
            let _ = tx.send(ServiceEvent::Catalog(result));
        });
    }

    fn dispatch(&mut self, ticket: PredictTicket) {
        debug!("Spawning prediction #{}", ticket.generation);
        self.spinner.reset();
        self.results_scroll = 0;

        let PredictTicket {
            generation,
            symptoms,
        } = ticket;
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = service.predict_all(&symptoms).await;
            let _ = tx.send(ServiceEvent::Prediction { generation, result });
        }));
    }

    /// Validate the query and dispatch it
    pub fn submit(&mut self) {
        if let Some(ticket) = self.session.submit() {
            self.dispatch(ticket);
        }
    }

    pub fn apply_event(&mut self, event: ServiceEvent) {
        match event {
            ServiceEvent::Health(healthy) => {
                if self.session.apply_health(healthy) && healthy {
                    self.fetch_catalog();
                }
            }
            ServiceEvent::Catalog(result) => self.model_info.apply_fetch(result),
            ServiceEvent::Prediction { generation, result } => {
                if self.session.apply_prediction(generation, result) {
                    self.in_flight = None;
                }
            }
        }
    }

    /// Apply every finished request without waiting
    pub fn poll_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next finished request and apply it
    #[cfg(test)]
    pub async fn next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.apply_event(event);
                true
            }
            None => false,
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::styled(
                "Healthcare Disease Classifier",
                Style::default().fg(self.theme.accent).bold(),
            ),
            Line::styled(
                "Multi-class text classification · TF-IDF+XGBoost, Feed-Forward NN, RNN and LSTM",
                Style::default().fg(self.theme.text_muted),
            ),
        ];
        let panel = Panel::new(&self.theme)
            .borders(Borders::BOTTOM)
            .no_padding();
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(panel.block())
            .render(area, buf);
    }

    fn render_banner(&self, area: Rect, buf: &mut Buffer) {
        let panel = Panel::new(&self.theme)
            .title("API unavailable")
            .style(PanelStyle::Error);
        let text = format!(
            "{} {}",
            Separators::WARNING,
            connectivity_message(self.session.api_url())
        );
        Paragraph::new(text)
            .style(Style::default().fg(self.theme.error))
            .wrap(Wrap { trim: true })
            .block(panel.block())
            .render(area, buf);
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let enabled = self.session.controls_enabled();
        let panel = Panel::new(&self.theme)
            .title("Enter Symptoms")
            .style(PanelStyle::Muted)
            .focused(enabled);
        let block = panel.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let symptoms = self.session.symptoms();
        let text_color = if enabled {
            self.theme.text_primary
        } else {
            self.theme.text_muted
        };
        let cursor = Span::styled(Separators::CURSOR, Style::default().fg(self.theme.accent));

        let lines: Vec<Line> = if symptoms.is_empty() {
            let mut spans = Vec::new();
            if enabled {
                spans.push(cursor);
            }
            spans.push(Span::styled(
                PLACEHOLDER,
                Style::default().fg(self.theme.text_muted).italic(),
            ));
            vec![Line::from(spans)]
        } else {
            let mut lines: Vec<Line> = symptoms
                .split('\n')
                .map(|l| Line::styled(l.to_string(), Style::default().fg(text_color)))
                .collect();
            if enabled {
                if let Some(last) = lines.last_mut() {
                    last.push_span(cursor);
                }
            }
            lines
        };

        let scroll = wrapped_height(symptoms, inner.width).saturating_sub(inner.height);
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(inner, buf);
    }

    fn render_examples(&self, area: Rect, buf: &mut Buffer) {
        let enabled = self.session.controls_enabled();
        let (key_style, text_style) = if enabled {
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

        // Two presets per line; "[Fn] " plus the two-space gap take 7 cells
        let label_width = ((area.width as usize).saturating_sub(EXAMPLES_PREFIX.len()) / 2)
            .saturating_sub(7)
            .clamp(12, EXAMPLE_LABEL_WIDTH);
        let mut spans = vec![Span::styled(
            EXAMPLES_PREFIX,
            Style::default().fg(self.theme.text_muted),
        )];
        for (i, example) in EXAMPLE_SYMPTOMS.iter().enumerate() {
            spans.push(Span::styled(format!("[F{}] ", i + 1), key_style));
            spans.push(Span::styled(
                truncate_with_ellipsis(example, label_width),
                text_style,
            ));
            spans.push(Span::raw("  "));
        }
        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_feedback(&self, area: Rect, buf: &mut Buffer) {
        let line = if self.session.is_loading() {
            Line::styled(
                format!(
                    "{} Analyzing symptoms with all models...",
                    self.spinner.frame()
                ),
                Style::default().fg(self.theme.accent),
            )
        } else {
            Line::styled(
                self.session.error().to_string(),
                Style::default().fg(self.theme.error).bold(),
            )
        };
        Paragraph::new(line).render(area, buf);
    }

    fn show_feedback(&self) -> bool {
        self.session.is_loading()
            || (!self.session.error().is_empty() && self.session.api_status() != ApiStatus::Error)
    }

    fn status_bar(&self) -> StatusBar<'_> {
        StatusBar::new(&self.theme, self.session.api_status(), self.session.api_url())
            .hint("Enter", "Predict", self.session.predict_enabled())
            .hint("F1-F4", "Examples", self.session.controls_enabled())
            .hint("Ctrl+L", "Clear", self.session.clear_enabled())
            .hint("Esc", "Quit", true)
    }
}

/// Rows the input occupies once wrapped at `width`, counting the cursor
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    text.split('\n')
        .map(|line| (line.chars().count() + 1).div_ceil(width).max(1))
        .sum::<usize>() as u16
}

impl<S: PredictionService> ViewTrait for ClassifierView<S> {
    fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let banner_height = if self.session.api_status() == ApiStatus::Error {
            4
        } else {
            0
        };
        let feedback_height = if self.show_feedback() { 1 } else { 0 };

        // Results take what they need first; the catalog gets the rest or
        // collapses when not even one row of tiles fits
        let results_view = PredictionResults::new(self.session.results(), &self.theme)
            .answered_at(self.session.answered_at());
        let mut spare = area
            .height
            .saturating_sub(CHROME_HEIGHT + INPUT_HEIGHT + banner_height + feedback_height);
        let results_height = results_view.required_height(area.width).min(spare);
        spare -= results_height;
        let models_height = if self.session.api_status() == ApiStatus::Healthy
            && spare >= self.model_info.min_height()
        {
            self.model_info.required_height(area.width).min(spare)
        } else {
            0
        };

        let [header, banner, input, examples, feedback, divider, results, models, _, status] =
            Layout::vertical([
                Constraint::Length(3),
                Constraint::Length(banner_height),
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Length(2),
                Constraint::Length(feedback_height),
                Constraint::Length(1),
                Constraint::Length(results_height),
                Constraint::Length(models_height),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(area);

        self.results_scroll = self.results_scroll.min(results_view.max_scroll(results));

        let buf = frame.buffer_mut();
        self.render_header(header, buf);
        if banner_height > 0 {
            self.render_banner(banner, buf);
        }
        self.render_input(input, buf);
        self.render_examples(examples, buf);
        if feedback_height > 0 {
            self.render_feedback(feedback, buf);
        }
        Paragraph::new(rule(divider.width as usize))
            .style(Style::default().fg(self.theme.border))
            .render(divider, buf);

        results_view.scroll(self.results_scroll).render(results, buf);
        if models_height > 0 {
            self.model_info.render(models, buf, &self.theme);
        }
        self.status_bar().render(status, buf);

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<ViewAction> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Ok(ViewAction::Quit),
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return Ok(ViewAction::Quit),
            KeyCode::Char('l') if ctrl => {
                self.session.clear();
            }
            KeyCode::Enter if key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
                self.session.insert_newline();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.session.backspace();
            }
            KeyCode::F(n @ 1..=4) => {
                self.session.load_example(n as usize - 1);
            }
            KeyCode::PageDown => self.results_scroll += 1,
            KeyCode::PageUp => self.results_scroll = self.results_scroll.saturating_sub(1),
            KeyCode::Char(c) if !ctrl => {
                self.session.insert_char(c);
            }
            _ => {}
        }
        Ok(ViewAction::Continue)
    }

    fn handle_paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\r') {
            if !self.session.insert_char(c) {
                break;
            }
        }
    }
}

impl<S: PredictionService> Drop for ClassifierView<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

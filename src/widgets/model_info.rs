//! Model catalog widget - one tile per model with its reported accuracy
//!
//! The service catalog is shown when the fetch succeeds with at least one
//! model. A failed or empty fetch falls back to the fixed accuracy table
//! and the panel title says so.

use ratatui::prelude::*;
use ratatui::widgets::*;
use tracing::{info, warn};

use crate::api::{ApiError, ModelCatalog, ModelEntry};
use crate::themes::Theme;
use crate::ui::panels::{Panel, PanelStyle};

const TILE_HEIGHT: u16 = 4;
const MIN_TILE_WIDTH: u16 = 24;

/// Where the displayed catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Service,
    Fallback,
}

impl CatalogSource {
    fn label(&self) -> &'static str {
        match self {
            Self::Service => "reported by service",
            Self::Fallback => "fallback table",
        }
    }
}

/// Model catalog panel state
#[derive(Debug, Clone)]
pub struct ModelInfo {
    loading: bool,
    catalog: ModelCatalog,
    source: CatalogSource,
    title: String,
}

impl ModelInfo {
    pub fn new() -> Self {
        Self {
            loading: true,
            catalog: ModelCatalog::default(),
            source: CatalogSource::Fallback,
            title: String::new(),
        }
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Record the outcome of the catalog fetch. Failures are logged and
    /// otherwise ignored.
    pub fn apply_fetch(&mut self, result: Result<ModelCatalog, ApiError>) {
        match result {
            Ok(catalog) if !catalog.is_empty() => {
                info!("Loaded {} models from service catalog", catalog.len());
                self.catalog = catalog;
                self.source = CatalogSource::Service;
            }
            Ok(_) => {
                warn!("Service catalog is empty, showing fallback accuracies");
                self.catalog = ModelCatalog::fallback();
                self.source = CatalogSource::Fallback;
            }
            Err(e) => {
                warn!("Error fetching model info: {}", e);
                self.catalog = ModelCatalog::fallback();
                self.source = CatalogSource::Fallback;
            }
        }
        self.title = format!("Available Models & Performance · {}", self.source.label());
        self.loading = false;
    }

    fn visible(&self) -> bool {
        !self.loading && !self.catalog.is_empty()
    }

    fn columns(width: u16) -> u16 {
        (width.saturating_sub(4) / MIN_TILE_WIDTH).max(1)
    }

    /// Smallest useful height: one row of tiles
    pub fn min_height(&self) -> u16 {
        if self.visible() {
            TILE_HEIGHT + 2
        } else {
            0
        }
    }

    /// Rows needed at `width`; zero when nothing renders
    pub fn required_height(&self, width: u16) -> u16 {
        if !self.visible() {
            return 0;
        }
        let columns = Self::columns(width) as usize;
        let rows = self.catalog.len().div_ceil(columns) as u16;
        rows * TILE_HEIGHT + 2
    }

    fn render_tile(entry: &ModelEntry, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let panel = Panel::new(theme).style(PanelStyle::Muted).no_padding();
        let block = panel.block();
        let inner = block.inner(area);
        block.render(area, buf);

        let accuracy_color = if entry.accuracy.is_some_and(|a| a > 0.0) {
            theme.text_primary
        } else {
            theme.text_muted
        };
        let text = vec![
            Line::styled(entry.name.as_str(), Style::default().fg(theme.accent).bold()),
            Line::styled(entry.accuracy_label(), Style::default().fg(accuracy_color)),
        ];
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }

    /// Render the catalog; renders nothing while loading or when empty.
    /// Tiles that do not fit are counted on the bottom border.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if !self.visible() {
            return;
        }

        let panel = Panel::new(theme).title(&self.title);
        let mut block = panel.block();
        let inner = block.inner(area);

        let columns = Self::columns(area.width);
        let fits = (inner.height / TILE_HEIGHT) as usize * columns as usize;
        let hidden = self.catalog.len().saturating_sub(fits);
        if hidden > 0 {
            block = block.title_bottom(
                Line::styled(
                    format!(" +{} more ", hidden),
                    Style::default().fg(theme.warning),
                )
                .right_aligned(),
            );
        }
        block.render(area, buf);

        let tile_width = inner.width / columns;
        for (i, entry) in self.catalog.entries.iter().take(fits).enumerate() {
            let col = i as u16 % columns;
            let row = i as u16 / columns;
            let y = inner.y + row * TILE_HEIGHT;
            let tile = Rect::new(inner.x + col * tile_width, y, tile_width, TILE_HEIGHT);
            Self::render_tile(entry, tile, buf, theme);
        }
    }
}

impl Default for ModelInfo {
    fn default() -> Self {
        Self::new()
    }
}

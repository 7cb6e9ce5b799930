//! View modules for dashboard screens

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::prelude::*;

pub mod classifier;

/// Action returned by a view's key handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    /// Key handled, stay in current view
    Continue,
    /// Request to leave the application
    Quit,
}

/// Trait for views that can be rendered
pub trait ViewTrait {
    /// Render the view
    fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;

    /// Handle key input
    fn handle_key(&mut self, _key: KeyEvent) -> Result<ViewAction> {
        // Default: don't handle
        Ok(ViewAction::Continue)
    }

    /// Handle pasted text
    fn handle_paste(&mut self, _text: &str) {}
}

//! Main application structure and event loop

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::Block;
use std::io;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::api::ClassifierClient;
use crate::themes::Theme;
use crate::views::classifier::ClassifierView;
use crate::views::{ViewAction, ViewTrait};

const TICK: Duration = Duration::from_millis(100);

/// Main application state
pub struct App {
    view: ClassifierView<ClassifierClient>,
    theme: Theme,
    should_quit: bool,
}

impl App {
    /// Create new app instance
    pub fn new() -> Result<Self> {
        info!("Initializing symptom dashboard");

        let theme = Theme::load();
        let api_url = crate::config::api_url();
        let client = ClassifierClient::from_env()?;
        info!("Using classification API at {}", client.base_url());

        let mut view = ClassifierView::new(client, api_url, theme.clone());
        view.mount();

        Ok(Self {
            view,
            theme,
            should_quit: false,
        })
    }

    /// Run the event loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        loop {
            let applied = self.view.poll_events();
            if applied > 0 {
                debug!("Applied {} service events", applied);
            }

            terminal.draw(|f| {
                let area = f.area();
                f.render_widget(
                    Block::default().style(Style::default().bg(self.theme.background)),
                    area,
                );
                if let Err(e) = self.view.render(f, area) {
                    warn!("View render error: {}", e);
                }
            })?;

            // Handle events; requests run on the runtime's worker threads
            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.view.handle_key(key)? == ViewAction::Quit {
                            self.should_quit = true;
                        }
                    }
                    Event::Paste(text) => self.view.handle_paste(&text),
                    _ => {}
                }
            }

            if self.should_quit {
                info!("Quit requested");
                break;
            }
        }

        Ok(())
    }
}

//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use crate::client::DisruptionSource;
use crate::state::PersistentViewState;

use super::dashboard::{Dashboard, InputMode};
use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::refresh::RefreshCoordinator;
use super::render::render;

/// Main TUI application.
pub struct App {
    source: Box<dyn DisruptionSource>,
    dash: Dashboard,
    coordinator: RefreshCoordinator,
    should_quit: bool,
}

impl App {
    pub fn new(source: Box<dyn DisruptionSource>, view_state: PersistentViewState) -> Self {
        let endpoint = source.endpoint().to_string();
        Self {
            source,
            dash: Dashboard::new(view_state, endpoint),
            coordinator: RefreshCoordinator::new(),
            should_quit: false,
        }
    }

    /// Runs the application until quit.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);

        // Initial fetch so the first frame is not empty.
        self.refresh();

        loop {
            terminal.draw(|frame| render(frame, &mut self.dash))?;

            match events.next() {
                Ok(Event::Tick) => {
                    if !self.dash.paused {
                        self.refresh();
                    }
                }
                Ok(Event::Key(key)) => {
                    let action = handle_key(&mut self.dash, key);
                    match action {
                        KeyAction::Quit => self.should_quit = true,
                        KeyAction::Refresh => self.refresh(),
                        KeyAction::OpenDetails => self.open_details(),
                        KeyAction::OpenSettings => self.open_settings(),
                        KeyAction::SaveSettings => self.save_settings(),
                        KeyAction::None => {}
                    }
                }
                Ok(Event::Resize(_)) => {
                    // ratatui recomputes the layout on the next draw
                }
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn refresh(&mut self) {
        self.coordinator.run_cycle(&mut self.dash, self.source.as_mut());
        debug!(
            cycles = self.coordinator.cycles,
            rows = self.dash.table.len(),
            "refresh cycle finished"
        );
    }

    fn open_details(&mut self) {
        let key = match self.dash.table.selected_row() {
            Some(row) => row.key(),
            None => return,
        };
        if let Err(e) = self.dash.details.open(self.source.as_mut(), key) {
            self.dash.status_message = Some(format!("details fetch failed: {}", e));
        }
    }

    fn open_settings(&mut self) {
        match self.dash.settings.open(self.source.as_mut()) {
            Ok(()) => self.dash.input_mode = InputMode::Retention,
            Err(e) => {
                self.dash.status_message = Some(format!("settings fetch failed: {}", e));
            }
        }
    }

    fn save_settings(&mut self) {
        self.dash.settings.save(self.source.as_mut());
        if !self.dash.settings.visible {
            self.dash.input_mode = InputMode::Normal;
            self.dash.status_message = Some("settings saved".to_string());
        }
    }
}

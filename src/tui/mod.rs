//! Terminal User Interface (TUI) for shopdash.
//!
//! A login screen followed by the job board, with a live tracker panel for
//! the selected job card. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, LoginField, LoginForm, Screen};
pub use event::{handle_key, Action};

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::debug;

use crate::config::Config;
use crate::core::Clock;
use crate::error::ShopError;
use crate::jobs::InMemoryJobStore;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(store: InMemoryJobStore, config: &Config) -> Result<(), ShopError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| ShopError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| ShopError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| ShopError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(store, config);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

fn draw<B: Backend, C: Clock + Clone>(
    terminal: &mut Terminal<B>,
    app: &App<C>,
) -> Result<(), ShopError> {
    terminal
        .draw(|frame| ui::render(frame, app))
        .map_err(|e| ShopError::Terminal(format!("Failed to draw: {e}")))?;
    Ok(())
}

/// Run the main application loop.
fn run_app<B: Backend, C: Clock + Clone>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
) -> Result<(), ShopError> {
    loop {
        app.drain_ticks();
        draw(terminal, app)?;

        let Some(action) = event::handle_events(app)? else {
            continue;
        };
        debug!(?action, "tui action");

        let outcome = match action {
            event::Action::Quit => break,
            event::Action::Submit => {
                app.status = Some("Signing in...".to_string());
                draw(terminal, app)?;
                app.submit_login();
                Ok(())
            }
            event::Action::Refresh => {
                app.refresh();
                app.status = Some(format!("Refreshed {} jobs", app.jobs.len()));
                Ok(())
            }
            event::Action::Start(activity) => app.start_selected(activity),
            event::Action::Pause => app.pause_selected(),
            event::Action::Stop => app.stop_selected(),
        };

        // Rejected actions are shown, not fatal.
        if let Err(e) = outcome {
            app.status = Some(e.to_string());
        }
    }

    Ok(())
}

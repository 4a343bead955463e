//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::Clock;
use crate::error::ShopError;
use crate::tracking::ActivityLabel;
use crate::tui::app::{App, Screen};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Submit the login form.
    Submit,
    /// Reload the job board.
    Refresh,
    /// Start tracking an activity on the selected job.
    Start(ActivityLabel),
    /// Pause the selected job's session.
    Pause,
    /// Stop the selected job's session and clock out.
    Stop,
}

pub const HELP: &str =
    "j/k:nav | s:start b:break w:wait c:qc | p:pause x:stop | r:refresh | q:quit";

/// Poll for one terminal event.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<C: Clock + Clone>(app: &mut App<C>) -> Result<Option<Action>, ShopError> {
    if event::poll(Duration::from_millis(100))
        .map_err(|e| ShopError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) =
            event::read().map_err(|e| ShopError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }
            return Ok(handle_key(app, key));
        }
    }

    Ok(None)
}

/// Map a key press to an action for the current screen.
pub fn handle_key<C: Clock + Clone>(app: &mut App<C>, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match app.screen {
        Screen::Login => handle_login_key(app, key),
        Screen::Board => handle_board_key(app, key),
    }
}

fn handle_login_key<C: Clock + Clone>(app: &mut App<C>, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Enter => return Some(Action::Submit),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login_toggle_field();
        }
        KeyCode::Backspace => app.login_backspace(),
        KeyCode::Char(c) => app.login_input(c),
        _ => {}
    }
    None
}

fn handle_board_key<C: Clock + Clone>(app: &mut App<C>, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('g') {
        app.handle_g();
        return None;
    }
    app.cancel_pending();

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        // Navigation - vim style
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            None
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.select_last();
            None
        }
        KeyCode::Home => {
            app.select_first();
            None
        }

        // Tracking
        KeyCode::Char('s') | KeyCode::Enter => Some(Action::Start(app.default_activity())),
        KeyCode::Char('b') => Some(Action::Start(ActivityLabel::Break)),
        KeyCode::Char('w') => Some(Action::Start(ActivityLabel::Waiting)),
        KeyCode::Char('c') => Some(Action::Start(ActivityLabel::QualityCheck)),
        KeyCode::Char('p') => Some(Action::Pause),
        KeyCode::Char('x') => Some(Action::Stop),

        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('?') => {
            app.status = Some(HELP.to_string());
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::jobs::InMemoryJobStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_login_keys_edit_fields() {
        let mut app = App::new(InMemoryJobStore::demo(), &Config::default());
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('a'))), None);
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('q'))), None);
        assert_eq!(app.login.username, "aq");
        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.login.password, "x");
        assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), Some(Action::Submit));
    }

    #[test]
    fn test_board_keys() {
        let mut app = App::new(InMemoryJobStore::demo(), &Config::default());
        app.screen = Screen::Board;

        assert_eq!(
            handle_key(&mut app, key(KeyCode::Char('s'))),
            Some(Action::Start(ActivityLabel::Work))
        );
        assert_eq!(
            handle_key(&mut app, key(KeyCode::Char('c'))),
            Some(Action::Start(ActivityLabel::QualityCheck))
        );
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('x'))), Some(Action::Stop));
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('j'))), None);
        assert_eq!(app.selected, 1);
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = App::new(InMemoryJobStore::demo(), &Config::default());
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, ctrl_c), Some(Action::Quit));
    }
}

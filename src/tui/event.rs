//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};

use crate::error::TallyError;
use crate::tui::app::App;

/// Action to take after handling an event.
pub enum Action {
    /// Quit the application.
    Quit,
    /// Reload entries and streaks.
    Refresh,
    /// Toggle the selected habit.
    Toggle,
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App<'_>) -> Result<Option<Action>, TallyError> {
    // Poll for events with a small timeout
    if event::poll(Duration::from_millis(100))
        .map_err(|e| TallyError::Config(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) =
            event::read().map_err(|e| TallyError::Config(format!("Event read failed: {e}")))?
        {
            // Handle Ctrl+C
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(Some(Action::Quit));
            }

            match key.code {
                // Quit
                KeyCode::Char('q') | KeyCode::Esc => {
                    return Ok(Some(Action::Quit));
                }

                // Navigation - vim style
                KeyCode::Char('j') | KeyCode::Down => {
                    app.select_next();
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    app.select_previous();
                }
                KeyCode::Char('G') | KeyCode::End => {
                    app.select_last();
                }
                KeyCode::Char('g') | KeyCode::Home => {
                    app.select_first();
                }

                // Toggle completion
                KeyCode::Char(' ') | KeyCode::Enter => {
                    return Ok(Some(Action::Toggle));
                }

                // Refresh
                KeyCode::Char('r') => {
                    return Ok(Some(Action::Refresh));
                }

                // Help
                KeyCode::Char('?') => {
                    app.status = Some(
                        "j/k:nav | space:toggle | r:refresh | q:quit".to_string(),
                    );
                }

                _ => {}
            }
        }
    }

    Ok(None)
}

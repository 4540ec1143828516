//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! Single-threaded: the loop blocks on the next terminal event, applies
//! it, and redraws.

use std::io;

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use super::state::{Action, App, Direction};
use super::update::update;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Input
        KeyCode::Char(c @ ('0'..='9' | '.' | '+' | '-' | '*' | '/' | '%' | '(' | ')')) => {
            Some(Action::Append(c.to_string()))
        }
        KeyCode::Char('^') => Some(Action::Append("**".to_string())),

        // Editing
        KeyCode::Enter | KeyCode::Char('=') => Some(Action::Calculate),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Esc | KeyCode::Delete | KeyCode::Char('c') | KeyCode::Char('C') => {
            Some(Action::Clear)
        }

        // Keypad navigation
        KeyCode::Up => Some(Action::Move(Direction::Up)),
        KeyCode::Down => Some(Action::Move(Direction::Down)),
        KeyCode::Left => Some(Action::Move(Direction::Left)),
        KeyCode::Right => Some(Action::Move(Direction::Right)),
        KeyCode::Char(' ') => Some(Action::Press),

        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    Terminal::new(backend)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the keypad until the user quits. Returns the final model so the
/// caller can report on it.
pub fn run(mut app: App) -> io::Result<App> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    info!("tui started");

    let outcome = event_loop(&mut terminal, &mut app);

    restore_terminal()?;
    info!(calculations = app.calc.history().len(), "tui stopped");
    outcome.map(|()| app)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        match event::read()? {
            // Press only
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(action) = map_key(key) {
                    debug!(?action, "key");
                    update(app, &action);
                }
            }
            _ => {} // resize is handled by the next draw; mouse ignored
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_maps_to_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Action::Quit));
    }

    #[test]
    fn plain_c_clears() {
        assert_eq!(map_key(key(KeyCode::Char('c'))), Some(Action::Clear));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(Action::Clear));
    }

    #[test]
    fn digits_and_operators_append() {
        for ch in "0123456789.+-*/%()".chars() {
            assert_eq!(
                map_key(key(KeyCode::Char(ch))),
                Some(Action::Append(ch.to_string())),
                "key {:?}",
                ch
            );
        }
    }

    #[test]
    fn caret_appends_power_operator() {
        assert_eq!(
            map_key(key(KeyCode::Char('^'))),
            Some(Action::Append("**".to_string()))
        );
    }

    #[test]
    fn enter_and_equals_calculate() {
        assert_eq!(map_key(key(KeyCode::Enter)), Some(Action::Calculate));
        assert_eq!(map_key(key(KeyCode::Char('='))), Some(Action::Calculate));
    }

    #[test]
    fn arrows_move_and_space_presses() {
        assert_eq!(map_key(key(KeyCode::Up)), Some(Action::Move(Direction::Up)));
        assert_eq!(map_key(key(KeyCode::Right)), Some(Action::Move(Direction::Right)));
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(Action::Press));
    }

    #[test]
    fn backspace_deletes() {
        assert_eq!(map_key(key(KeyCode::Backspace)), Some(Action::Backspace));
    }

    #[test]
    fn unmapped_key_returns_none() {
        assert_eq!(map_key(key(KeyCode::Char('z'))), None);
        assert_eq!(map_key(key(KeyCode::Tab)), None);
    }
}

//! TUI state algebra: the model and the vocabulary of user intent.
//!
//! The display controller owns the text; the TUI adds only what the
//! terminal needs on top of it (keypad focus, the last failure reason,
//! the quit flag).

use crate::display::DisplayController;

use super::keypad::Focus;

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// Display text, evaluator and history.
    pub calc: DisplayController,

    /// Keypad button under the cursor.
    pub focus: Focus,

    /// Why the last calculation failed. The display itself only says
    /// `Error`; this is shown dimmed underneath and cleared on the next edit.
    pub last_error: Option<String>,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    pub fn new(calc: DisplayController) -> Self {
        App {
            calc,
            focus: Focus::default(),
            last_error: None,
            should_quit: false,
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append text to the display.
    Append(String),
    /// Empty the display.
    Clear,
    /// Delete the last character.
    Backspace,
    /// Evaluate the display.
    Calculate,
    /// Move keypad focus.
    Move(Direction),
    /// Press the focused keypad button.
    Press,
    /// Quit the application.
    Quit,
}

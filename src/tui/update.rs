//! State transitions: (App, Action) → App.
//!
//! All calculator semantics live in [`DisplayController`]; this layer
//! only routes actions to it and keeps the keypad focus and error hint
//! in step. Fully testable without a terminal.
//!
//! [`DisplayController`]: crate::display::DisplayController

use super::keypad;
use super::state::{Action, App};

/// Apply one action to the model.
pub fn update(app: &mut App, action: &Action) {
    match action {
        Action::Append(text) => {
            app.calc.append_value(text);
            app.last_error = None;
            if let Some(focus) = keypad::position_of(text) {
                app.focus = focus;
            }
        }
        Action::Clear => {
            app.calc.clear_display();
            app.last_error = None;
        }
        Action::Backspace => {
            app.calc.backspace();
            app.last_error = None;
        }
        Action::Calculate => {
            app.last_error = app.calc.calculate().err().map(|e| e.to_string());
        }
        Action::Move(direction) => {
            app.focus = app.focus.moved(*direction);
        }
        Action::Press => {
            let pressed = app.focus.button().action();
            update(app, &pressed);
        }
        Action::Quit => {
            app.should_quit = true;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

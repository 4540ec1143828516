//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Cyan: operators and the focused button
//! - Green: the equals button, successful results in history
//! - Red: the clear button, the error marker
//! - Dim: hints, history expressions, placeholders
//! - Bold: the display text

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// DISPLAY
// ============================================================================

pub const STYLE_DISPLAY: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

pub const STYLE_ERROR: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Placeholder `0` on an empty display.
pub const STYLE_PLACEHOLDER: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// KEYPAD
// ============================================================================

pub const STYLE_BUTTON: Style = Style::new();

pub const STYLE_OPERATOR: Style = Style::new().fg(Color::Cyan);

pub const STYLE_EQUALS: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

pub const STYLE_CLEAR: Style = Style::new().fg(Color::Red);

pub const STYLE_FOCUS: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

// ============================================================================
// CHROME
// ============================================================================

pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

pub const STYLE_RESULT: Style = Style::new().fg(Color::Green);

pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

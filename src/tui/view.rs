//! Pure rendering: map App state to ratatui widget trees.
//!
//! Layout, top to bottom: title, display, error hint, keypad beside
//! history, help line. The only effect is `Frame::render_widget`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::history::History;

use super::keypad::{Button, COLS, Focus, LAYOUT};
use super::state::App;
use super::theme;

/// Width of one keypad cell, including padding.
const CELL_WIDTH: usize = 5;

/// Keypad panel width: cells plus borders.
const KEYPAD_WIDTH: u16 = (CELL_WIDTH * COLS) as u16 + 2;

const HELP_TEXT: &str =
    "[0-9 + - * / % ( ) ^] type  [Enter] =  [Bksp] delete  [Esc] clear  [arrows/Space] keypad  [q] quit";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole UI to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Length(3), // display
        Constraint::Length(1), // error hint
        Constraint::Min(0),    // keypad + history
        Constraint::Length(1), // help
    ])
    .split(frame.area());

    frame.render_widget(
        Paragraph::new(Span::styled("keycalc", theme::STYLE_TITLE)),
        chunks[0],
    );

    render_display(app, frame, chunks[1]);
    render_hint(app.last_error.as_deref(), frame, chunks[2]);

    let body = Layout::horizontal([Constraint::Length(KEYPAD_WIDTH), Constraint::Min(0)])
        .split(chunks[3]);
    render_keypad(app.focus, frame, body[0]);
    render_history(app.calc.history(), frame, body[1]);

    frame.render_widget(
        Paragraph::new(Span::styled(HELP_TEXT, theme::STYLE_HELP)),
        chunks[4],
    );
}

// ============================================================================
// DISPLAY
// ============================================================================

fn render_display(app: &App, frame: &mut Frame, area: Rect) {
    let text = app.calc.text();
    let inner_width = area.width.saturating_sub(2) as usize;

    let span = if text.is_empty() {
        Span::styled("0", theme::STYLE_PLACEHOLDER)
    } else if app.calc.is_error() {
        Span::styled(text, theme::STYLE_ERROR)
    } else {
        Span::styled(visible_tail(text, inner_width), theme::STYLE_DISPLAY)
    };

    let display = Paragraph::new(Line::from(span))
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(display, area);
}

/// The last `width` characters of `text`, so the cursor end stays visible.
pub fn visible_tail(text: &str, width: usize) -> &str {
    let count = text.chars().count();
    if count <= width {
        return text;
    }
    let skip = count - width;
    match text.char_indices().nth(skip) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

fn render_hint(reason: Option<&str>, frame: &mut Frame, area: Rect) {
    if let Some(reason) = reason {
        let hint = Paragraph::new(Span::styled(format!(" {}", reason), theme::STYLE_DIM))
            .alignment(Alignment::Right);
        frame.render_widget(hint, area);
    }
}

// ============================================================================
// KEYPAD
// ============================================================================

fn render_keypad(focus: Focus, frame: &mut Frame, area: Rect) {
    let mut lines = Vec::new();

    for (row, buttons) in LAYOUT.iter().enumerate() {
        let spans: Vec<Span> = buttons
            .iter()
            .enumerate()
            .map(|(col, &button)| {
                let focused = focus.row == row && focus.col == col;
                Span::styled(
                    format!("{:^width$}", button.label(), width = CELL_WIDTH),
                    button_style(button, focused),
                )
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    lines.pop();

    let keypad = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(keypad, area);
}

fn button_style(button: Button, focused: bool) -> ratatui::style::Style {
    if focused {
        theme::STYLE_FOCUS
    } else if button == Button::Equals {
        theme::STYLE_EQUALS
    } else if button == Button::Clear {
        theme::STYLE_CLEAR
    } else if button.is_operator() {
        theme::STYLE_OPERATOR
    } else {
        theme::STYLE_BUTTON
    }
}

// ============================================================================
// HISTORY
// ============================================================================

fn render_history(history: &History, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" History ");

    let lines: Vec<Line> = if history.is_empty() {
        vec![Line::from(Span::styled(" No calculations yet", theme::STYLE_DIM))]
    } else {
        // Newest first
        history
            .entries()
            .rev()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(format!(" {}", entry.expression), theme::STYLE_DIM),
                    Span::styled(" = ", theme::STYLE_DIM),
                    Span::styled(entry.result.clone(), theme::STYLE_RESULT),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// TESTS
// ============================================================================

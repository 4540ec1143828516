//! Keypad layout: which button sits where and what pressing it does.
//!
//! ```text
//!  C   (   )   /
//!  7   8   9   *
//!  4   5   6   -
//!  1   2   3   +
//!  0   .   %   =
//! ```

use super::state::{Action, Direction};

pub const ROWS: usize = 5;
pub const COLS: usize = 4;

/// One keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Digit(u8),
    Decimal,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    OpenParen,
    CloseParen,
    Equals,
    Clear,
}

pub const LAYOUT: [[Button; COLS]; ROWS] = [
    [Button::Clear, Button::OpenParen, Button::CloseParen, Button::Divide],
    [Button::Digit(7), Button::Digit(8), Button::Digit(9), Button::Multiply],
    [Button::Digit(4), Button::Digit(5), Button::Digit(6), Button::Subtract],
    [Button::Digit(1), Button::Digit(2), Button::Digit(3), Button::Add],
    [Button::Digit(0), Button::Decimal, Button::Remainder, Button::Equals],
];

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl Button {
    /// Text on the button. For input buttons this is also what gets appended.
    pub fn label(self) -> &'static str {
        match self {
            Button::Digit(d) => DIGIT_LABELS.get(d as usize).copied().unwrap_or("?"),
            Button::Decimal => ".",
            Button::Add => "+",
            Button::Subtract => "-",
            Button::Multiply => "*",
            Button::Divide => "/",
            Button::Remainder => "%",
            Button::OpenParen => "(",
            Button::CloseParen => ")",
            Button::Equals => "=",
            Button::Clear => "C",
        }
    }

    pub fn is_operator(self) -> bool {
        matches!(
            self,
            Button::Add | Button::Subtract | Button::Multiply | Button::Divide | Button::Remainder
        )
    }

    /// The action a press of this button produces.
    pub fn action(self) -> Action {
        match self {
            Button::Equals => Action::Calculate,
            Button::Clear => Action::Clear,
            other => Action::Append(other.label().to_string()),
        }
    }
}

/// Focused keypad cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focus {
    pub row: usize,
    pub col: usize,
}

impl Default for Focus {
    /// The `=` button.
    fn default() -> Self {
        Focus {
            row: ROWS - 1,
            col: COLS - 1,
        }
    }
}

impl Focus {
    /// Move one cell, clamped to the grid edges.
    pub fn moved(self, direction: Direction) -> Focus {
        match direction {
            Direction::Up => Focus {
                row: self.row.saturating_sub(1),
                ..self
            },
            Direction::Down => Focus {
                row: (self.row + 1).min(ROWS - 1),
                ..self
            },
            Direction::Left => Focus {
                col: self.col.saturating_sub(1),
                ..self
            },
            Direction::Right => Focus {
                col: (self.col + 1).min(COLS - 1),
                ..self
            },
        }
    }

    pub fn button(self) -> Button {
        LAYOUT[self.row.min(ROWS - 1)][self.col.min(COLS - 1)]
    }
}

/// Where the button whose label is `text` sits, if any.
pub fn position_of(text: &str) -> Option<Focus> {
    LAYOUT.iter().enumerate().find_map(|(row, buttons)| {
        buttons
            .iter()
            .position(|b| b.label() == text)
            .map(|col| Focus { row, col })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_digit_is_on_the_keypad() {
        for d in 0..=9u8 {
            let label = Button::Digit(d).label();
            assert!(position_of(label).is_some(), "digit {} missing", d);
        }
    }

    #[test]
    fn input_buttons_append_their_label() {
        assert_eq!(Button::Digit(7).action(), Action::Append("7".into()));
        assert_eq!(Button::Remainder.action(), Action::Append("%".into()));
        assert_eq!(Button::OpenParen.action(), Action::Append("(".into()));
    }

    #[test]
    fn control_buttons_map_to_control_actions() {
        assert_eq!(Button::Equals.action(), Action::Calculate);
        assert_eq!(Button::Clear.action(), Action::Clear);
    }

    #[test]
    fn default_focus_is_equals() {
        assert_eq!(Focus::default().button(), Button::Equals);
    }

    #[test]
    fn focus_clamps_at_edges() {
        let corner = Focus { row: 0, col: 0 };
        assert_eq!(corner.moved(Direction::Up), corner);
        assert_eq!(corner.moved(Direction::Left), corner);

        let far = Focus::default();
        assert_eq!(far.moved(Direction::Down), far);
        assert_eq!(far.moved(Direction::Right), far);
    }

    #[test]
    fn focus_moves_one_cell() {
        let start = Focus { row: 2, col: 1 };
        assert_eq!(start.moved(Direction::Up).button(), Button::Digit(8));
        assert_eq!(start.moved(Direction::Right).button(), Button::Digit(6));
    }

    #[test]
    fn position_of_unknown_label_is_none() {
        assert_eq!(position_of("**"), None);
        assert_eq!(position_of("x"), None);
    }

    #[test]
    fn operators_are_flagged() {
        assert!(Button::Multiply.is_operator());
        assert!(!Button::Digit(1).is_operator());
        assert!(!Button::Equals.is_operator());
    }
}

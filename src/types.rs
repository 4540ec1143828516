//! Domain types for keycalc.
//!
//! Tokens and syntax tree for the arithmetic grammar, the evaluation
//! failure taxonomy, and the records the CLI surfaces report.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// OPERATORS
// ============================================================================

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Truncated remainder, sign follows the dividend.
    Rem,
    /// Exponentiation, right associative.
    Pow,
}

/// Prefix sign operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

// ============================================================================
// TOKENS
// ============================================================================

/// What a token is, independent of where it was found.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    LParen,
    RParen,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::StarStar => write!(f, "'**'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
        }
    }
}

/// A lexed token with its byte offset in the display text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

impl Token {
    pub fn new(kind: TokenKind, pos: usize) -> Self {
        Token { kind, pos }
    }
}

// ============================================================================
// SYNTAX TREE
// ============================================================================

/// Parsed arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Expr::Number(value)
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

// ============================================================================
// EVALUATION FAILURE
// ============================================================================

/// Any failure while interpreting display text as an expression.
///
/// The display collapses every variant to the literal `Error`; callers
/// that want the reason get it from here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number '{literal}' at position {pos}")]
    InvalidNumber { literal: String, pos: usize },

    #[error("unexpected {found} at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unclosed parenthesis opened at position {pos}")]
    UnclosedParen { pos: usize },

    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("expression longer than {limit} tokens")]
    TooLong { limit: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

// ============================================================================
// POLICIES & FORMATS
// ============================================================================

/// How division and remainder by zero (and other non-finite values) behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivisionMode {
    /// Division by zero and non-finite results are evaluation failures.
    #[default]
    Error,
    /// IEEE-754: results may be `Infinity`, `-Infinity` or `NaN`.
    Ieee,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

// ============================================================================
// EVALUATION RECORDS
// ============================================================================

/// Outcome of evaluating one expression, as reported by `eval` and `batch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// The expression exactly as given.
    pub expression: String,
    /// Formatted result on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Failure reason otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Evaluation {
    pub fn from_result(expression: impl Into<String>, result: Result<String, EvalError>) -> Self {
        let expression = expression.into();
        match result {
            Ok(value) => Evaluation {
                expression,
                result: Some(value),
                error: None,
            },
            Err(e) => Evaluation {
                expression,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// What the calculator display would show for this evaluation.
    pub fn display_value(&self) -> &str {
        match &self.result {
            Some(value) if self.error.is_none() => value,
            _ => crate::display::ERROR_TEXT,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_kind_display_quotes_operators() {
        assert_eq!(TokenKind::LParen.to_string(), "'('");
        assert_eq!(TokenKind::Number(2.5).to_string(), "number 2.5");
    }

    #[test]
    fn eval_error_messages_carry_position() {
        let err = EvalError::UnexpectedChar { ch: 'x', pos: 3 };
        assert_eq!(err.to_string(), "unexpected character 'x' at position 3");
    }

    #[test]
    fn evaluation_from_ok_result() {
        let eval = Evaluation::from_result("2+2", Ok("4".to_string()));
        assert!(eval.is_ok());
        assert_eq!(eval.display_value(), "4");
    }

    #[test]
    fn evaluation_from_error_shows_error_marker() {
        let eval = Evaluation::from_result("2+", Err(EvalError::UnexpectedEnd));
        assert!(!eval.is_ok());
        assert_eq!(eval.display_value(), "Error");
        assert_eq!(eval.error.as_deref(), Some("unexpected end of expression"));
    }

    #[test]
    fn evaluation_json_omits_missing_fields() {
        let eval = Evaluation::from_result("1", Ok("1".to_string()));
        let json = serde_json::to_string(&eval).unwrap();
        assert_eq!(json, r#"{"expression":"1","result":"1"}"#);
    }

    #[test]
    fn division_mode_defaults_to_error() {
        assert_eq!(DivisionMode::default(), DivisionMode::Error);
    }
}

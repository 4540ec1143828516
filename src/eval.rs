//! Arithmetic evaluation: display text → number → display text.
//!
//! The evaluator only knows numbers and the operators of the grammar in
//! [`crate::parser`]; nothing in the input can name or call anything.

use tracing::trace;

use crate::config::{EvalConfig, MAX_DEPTH_LIMIT, MAX_PRECISION};
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::types::{BinaryOp, DivisionMode, EvalError, Expr, UnaryOp};

/// Magnitudes at or above this are shown in exponent form.
const EXPONENT_ABOVE: f64 = 1e21;

/// Non-zero magnitudes below this are shown in exponent form.
const EXPONENT_BELOW: f64 = 1e-6;

/// Evaluates expressions under one set of rules.
///
/// Immutable once built, so a single instance can be shared across
/// threads in batch mode.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Evaluator { config }
    }

    /// Lex, parse and evaluate `input`.
    pub fn evaluate(&self, input: &str) -> Result<f64, EvalError> {
        let tokens = tokenize(input)?;
        let expr = parse(&tokens, self.config.max_depth.min(MAX_DEPTH_LIMIT))?;
        trace!(?expr, "parsed");
        self.eval_expr(&expr)
    }

    /// Evaluate and format the result the way the display shows it.
    pub fn evaluate_to_string(&self, input: &str) -> Result<String, EvalError> {
        self.evaluate(input).map(|value| self.format(value))
    }

    /// Format a value with this evaluator's precision.
    pub fn format(&self, value: f64) -> String {
        format_number(value, self.config.precision)
    }

    /// Evaluate a parsed tree.
    ///
    /// Recursion depth is bounded by the parser's nesting limit.
    pub fn eval_expr(&self, expr: &Expr) -> Result<f64, EvalError> {
        match expr {
            Expr::Number(value) => self.check(*value),
            Expr::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                Ok(match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Minus => -value,
                })
            }
            Expr::Binary { op, left, right } => {
                let l = self.eval_expr(left)?;
                let r = self.eval_expr(right)?;
                self.apply(*op, l, r)
            }
        }
    }

    fn apply(&self, op: BinaryOp, l: f64, r: f64) -> Result<f64, EvalError> {
        let strict = self.config.division_by_zero == DivisionMode::Error;

        if strict && matches!(op, BinaryOp::Div | BinaryOp::Rem) && r == 0.0 {
            return Err(EvalError::DivisionByZero);
        }

        let value = match op {
            BinaryOp::Add => l + r,
            BinaryOp::Sub => l - r,
            BinaryOp::Mul => l * r,
            BinaryOp::Div => l / r,
            BinaryOp::Rem => l % r,
            BinaryOp::Pow => l.powf(r),
        };
        self.check(value)
    }

    /// In strict mode every intermediate value must be finite.
    fn check(&self, value: f64) -> Result<f64, EvalError> {
        match self.config.division_by_zero {
            DivisionMode::Error if !value.is_finite() => Err(EvalError::NonFinite),
            _ => Ok(value),
        }
    }
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Render a number for the display.
///
/// Shortest round-trip digits, no trailing `.0`, `-0` shown as `0`,
/// exponent form (`1e+21`, `1.5e-7`) for very large or very small
/// magnitudes. With `precision`, the value is first rounded half away
/// from zero to that many fractional digits (at most [`MAX_PRECISION`]).
pub fn format_number(value: f64, precision: Option<u32>) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let value = match precision {
        Some(digits) => round_to(value, digits),
        None => value,
    };

    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= EXPONENT_ABOVE || magnitude < EXPONENT_BELOW {
        exponent_form(value)
    } else {
        format!("{}", value)
    }
}

fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits.min(MAX_PRECISION) as i32);
    let scaled = value * scale;
    // Too large to carry that many fractional digits anyway
    if !scaled.is_finite() || scaled.abs() >= 2f64.powi(53) {
        return value;
    }
    scaled.round() / scale
}

fn exponent_form(value: f64) -> String {
    let raw = format!("{:e}", value);
    match raw.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => raw,
    }
}

// ============================================================================
// TESTS
// ============================================================================

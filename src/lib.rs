//! keycalc: a keypad calculator with a safe arithmetic evaluator.

pub mod batch;
pub mod config;
pub mod display;
pub mod eval;
pub mod history;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod report;
pub mod tui;
pub mod types;

//! Terminal keypad.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: model and actions
//! - `keypad`: button grid and focus
//! - `update`: transitions
//! - `view`: rendering
//! - `theme`: styles
//! - `run`: effects (terminal, event loop)

pub mod keypad;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

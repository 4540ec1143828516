//! The display controller: an owned text buffer plus the three keypad
//! operations (append, clear, calculate).
//!
//! The buffer is plain text. Appending never validates; validity is
//! only decided when `calculate` hands the text to the evaluator.

use tracing::debug;

use crate::config::Config;
use crate::eval::Evaluator;
use crate::history::History;
use crate::types::EvalError;

/// What the display shows after a failed calculation.
pub const ERROR_TEXT: &str = "Error";

/// Owns the display text, the evaluator and the calculation history.
#[derive(Debug, Clone)]
pub struct DisplayController {
    text: String,
    evaluator: Evaluator,
    history: History,
}

impl Default for DisplayController {
    fn default() -> Self {
        DisplayController::from_config(&Config::default())
    }
}

impl DisplayController {
    pub fn new(evaluator: Evaluator, history_limit: usize) -> Self {
        DisplayController {
            text: String::new(),
            evaluator,
            history: History::new(history_limit),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        DisplayController::new(
            Evaluator::new(config.eval.clone()),
            config.display.history_limit,
        )
    }

    /// Start with `text` already on the display.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// True when the display shows the error marker.
    pub fn is_error(&self) -> bool {
        self.text == ERROR_TEXT
    }

    /// Append `value` verbatim.
    ///
    /// Anything is accepted, including text after a result or after
    /// the error marker.
    pub fn append_value(&mut self, value: &str) {
        self.text.push_str(value);
    }

    pub fn clear_display(&mut self) {
        self.text.clear();
    }

    /// Remove the last character. On the error marker, clear instead.
    pub fn backspace(&mut self) {
        if self.is_error() {
            self.text.clear();
        } else {
            self.text.pop();
        }
    }

    /// Evaluate the display text and replace it with the outcome.
    ///
    /// On success the display shows the formatted result and the
    /// calculation is recorded in history. On failure the display shows
    /// [`ERROR_TEXT`]; the reason is returned but never displayed.
    pub fn calculate(&mut self) -> Result<String, EvalError> {
        let expression = std::mem::take(&mut self.text);

        match self.evaluator.evaluate_to_string(&expression) {
            Ok(result) => {
                debug!(%expression, %result, "calculated");
                self.history.record(expression, result.clone());
                self.text.clone_from(&result);
                Ok(result)
            }
            Err(e) => {
                debug!(%expression, error = %e, "evaluation failed");
                self.text = ERROR_TEXT.to_string();
                Err(e)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EvalConfig;
    use crate::types::DivisionMode;

    fn controller_with(text: &str) -> DisplayController {
        DisplayController::default().with_text(text)
    }

    #[test]
    fn starts_empty() {
        assert_eq!(DisplayController::default().text(), "");
    }

    #[test]
    fn append_concatenates() {
        let mut calc = DisplayController::default();
        calc.append_value("1");
        calc.append_value("+2");

        let mut once = DisplayController::default();
        once.append_value("1+2");

        assert_eq!(calc.text(), once.text());
        assert_eq!(calc.text(), "1+2");
    }

    #[test]
    fn append_accepts_anything() {
        let mut calc = DisplayController::default();
        calc.append_value("**)(");
        calc.append_value("abc");
        assert_eq!(calc.text(), "**)(abc");
    }

    #[test]
    fn clear_always_empties() {
        for start in ["", "12+3", "Error", "4"] {
            let mut calc = controller_with(start);
            calc.clear_display();
            assert_eq!(calc.text(), "");
        }
    }

    #[test]
    fn calculate_success_replaces_text_with_result() {
        let mut calc = controller_with("2+2");
        assert_eq!(calc.calculate(), Ok("4".to_string()));
        assert_eq!(calc.text(), "4");
        assert!(!calc.is_error());
    }

    #[test]
    fn calculate_failure_shows_error_marker() {
        let mut calc = controller_with("2+");
        assert_eq!(calc.calculate(), Err(EvalError::UnexpectedEnd));
        assert_eq!(calc.text(), "Error");
        assert!(calc.is_error());
    }

    #[test]
    fn calculate_on_empty_is_error() {
        let mut calc = DisplayController::default();
        assert_eq!(calc.calculate(), Err(EvalError::Empty));
        assert_eq!(calc.text(), "Error");
    }

    #[test]
    fn division_by_zero_is_error_by_default() {
        let mut calc = controller_with("1/0");
        assert!(calc.calculate().is_err());
        assert_eq!(calc.text(), "Error");
    }

    #[test]
    fn division_by_zero_in_ieee_mode_is_infinity() {
        let evaluator = Evaluator::new(EvalConfig {
            division_by_zero: DivisionMode::Ieee,
            ..EvalConfig::default()
        });
        let mut calc = DisplayController::new(evaluator, 10).with_text("1/0");
        assert_eq!(calc.calculate(), Ok("Infinity".to_string()));
    }

    #[test]
    fn result_can_be_extended() {
        let mut calc = controller_with("2+2");
        calc.calculate().unwrap();
        calc.append_value("*3");
        assert_eq!(calc.text(), "4*3");
        assert_eq!(calc.calculate(), Ok("12".to_string()));
    }

    #[test]
    fn appending_after_error_keeps_marker_text() {
        let mut calc = controller_with(")");
        calc.calculate().unwrap_err();
        calc.append_value("5");
        assert_eq!(calc.text(), "Error5");
        assert!(calc.calculate().is_err());
        assert_eq!(calc.text(), "Error");
    }

    #[test]
    fn history_records_successes_only() {
        let mut calc = controller_with("6*7");
        calc.calculate().unwrap();
        calc.append_value("+");
        calc.calculate().unwrap_err();

        assert_eq!(calc.history().len(), 1);
        let entry = calc.history().last().unwrap();
        assert_eq!(entry.expression, "6*7");
        assert_eq!(entry.result, "42");
    }

    #[test]
    fn backspace_removes_last_char() {
        let mut calc = controller_with("12+");
        calc.backspace();
        assert_eq!(calc.text(), "12");
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut calc = DisplayController::default();
        calc.backspace();
        assert_eq!(calc.text(), "");
    }

    #[test]
    fn backspace_on_error_clears() {
        let mut calc = controller_with("1+");
        calc.calculate().unwrap_err();
        calc.backspace();
        assert_eq!(calc.text(), "");
    }
}

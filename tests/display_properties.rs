//! Property tests for the display controller and evaluator.

use proptest::prelude::*;

use keycalc::display::{DisplayController, ERROR_TEXT};
use keycalc::eval::Evaluator;

/// Fragments a keypad can produce.
fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u8..=9).prop_map(|d| d.to_string()),
        Just(".".to_string()),
        Just("+".to_string()),
        Just("-".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
        Just("%".to_string()),
        Just("**".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
    ]
}

fn fragments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(fragment(), 0..24)
}

proptest! {
    /// Appending piecewise equals appending the concatenation.
    #[test]
    fn append_is_associative(parts in fragments()) {
        let mut piecewise = DisplayController::default();
        for part in &parts {
            piecewise.append_value(part);
        }

        let mut whole = DisplayController::default();
        whole.append_value(&parts.concat());

        prop_assert_eq!(piecewise.text(), whole.text());
    }

    /// Clear empties the display from any state.
    #[test]
    fn clear_always_empties(parts in fragments(), calculate_first in any::<bool>()) {
        let mut calc = DisplayController::default();
        for part in &parts {
            calc.append_value(part);
        }
        if calculate_first {
            let _ = calc.calculate();
        }
        calc.clear_display();
        prop_assert_eq!(calc.text(), "");
    }

    /// Calculate leaves either a result or exactly the error marker,
    /// and its return value agrees with the display.
    #[test]
    fn calculate_outcome_matches_display(parts in fragments()) {
        let mut calc = DisplayController::default();
        calc.append_value(&parts.concat());

        match calc.calculate() {
            Ok(result) => {
                prop_assert_eq!(calc.text(), result.as_str());
                prop_assert_ne!(calc.text(), ERROR_TEXT);
            }
            Err(_) => prop_assert_eq!(calc.text(), ERROR_TEXT),
        }
    }

    /// The evaluator never panics on arbitrary text.
    #[test]
    fn evaluate_never_panics(input in ".{0,64}") {
        let _ = Evaluator::default().evaluate(&input);
    }

    /// Formatted results evaluate back to the same value.
    #[test]
    fn results_reparse_to_same_value(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6) {
        let evaluator = Evaluator::default();
        let first = evaluator.evaluate_to_string(&format!("{} + {}", a, b)).unwrap();
        let again = evaluator.evaluate(&format!("({})", first)).unwrap();
        prop_assert_eq!(evaluator.format(again), first);
    }

    /// Integer arithmetic matches native integer arithmetic.
    #[test]
    fn small_integer_arithmetic(a in -10_000i64..10_000, b in 1i64..10_000) {
        let evaluator = Evaluator::default();
        prop_assert_eq!(evaluator.evaluate(&format!("{} + {}", a, b)).unwrap(), (a + b) as f64);
        prop_assert_eq!(evaluator.evaluate(&format!("{} * {}", a, b)).unwrap(), (a * b) as f64);
        prop_assert_eq!(evaluator.evaluate(&format!("{} % {}", a, b)).unwrap(), (a % b) as f64);
    }
}

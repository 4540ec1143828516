//! Batch evaluation: many independent expressions, evaluated in parallel.
//!
//! Each expression gets its own evaluation against a shared, immutable
//! [`Evaluator`]. Output order matches input order.

use rayon::prelude::*;

use crate::eval::Evaluator;
use crate::types::Evaluation;

/// Totals over a set of evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Extract expressions from batch input: one per line, blank lines and
/// `#` comments skipped, surrounding whitespace trimmed.
pub fn read_expressions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

pub fn evaluate_one(expression: &str, evaluator: &Evaluator) -> Evaluation {
    Evaluation::from_result(expression, evaluator.evaluate_to_string(expression))
}

/// Evaluate all expressions on the rayon pool.
pub fn evaluate_all(expressions: &[String], evaluator: &Evaluator) -> Vec<Evaluation> {
    evaluate_all_with_progress(expressions, evaluator, || {})
}

/// Like [`evaluate_all`], calling `on_done` once per finished expression.
///
/// `on_done` runs on worker threads, in no particular order.
pub fn evaluate_all_with_progress<F>(
    expressions: &[String],
    evaluator: &Evaluator,
    on_done: F,
) -> Vec<Evaluation>
where
    F: Fn() + Sync,
{
    expressions
        .par_iter()
        .map(|expression| {
            let evaluation = evaluate_one(expression, evaluator);
            on_done();
            evaluation
        })
        .collect()
}

pub fn summarize(evaluations: &[Evaluation]) -> BatchSummary {
    let succeeded = evaluations.iter().filter(|e| e.is_ok()).count();
    BatchSummary {
        total: evaluations.len(),
        succeeded,
        failed: evaluations.len() - succeeded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn read_skips_blanks_and_comments() {
        let input = "1+1\n\n   # a comment\n  2*3  \n#another\n";
        assert_eq!(read_expressions(input), vec!["1+1", "2*3"]);
    }

    #[test]
    fn read_empty_input() {
        assert!(read_expressions("").is_empty());
    }

    #[test]
    fn evaluate_all_preserves_order() {
        let expressions: Vec<String> = (0..200).map(|i| format!("{} * 2", i)).collect();
        let results = evaluate_all(&expressions, &Evaluator::default());

        assert_eq!(results.len(), 200);
        for (i, evaluation) in results.iter().enumerate() {
            assert_eq!(evaluation.expression, format!("{} * 2", i));
            assert_eq!(evaluation.result, Some((i * 2).to_string()));
        }
    }

    #[test]
    fn failures_are_recorded_not_fatal() {
        let expressions = vec!["2+2".to_string(), "2+".to_string(), "1/0".to_string()];
        let results = evaluate_all(&expressions, &Evaluator::default());

        assert_eq!(results[0].display_value(), "4");
        assert_eq!(results[1].display_value(), "Error");
        assert_eq!(results[2].error.as_deref(), Some("division by zero"));
    }

    #[test]
    fn progress_called_once_per_expression() {
        let expressions: Vec<String> = (0..50).map(|i| format!("{} + 1", i)).collect();
        let done = AtomicUsize::new(0);

        let results = evaluate_all_with_progress(&expressions, &Evaluator::default(), || {
            done.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(done.load(Ordering::Relaxed), 50);
        assert_eq!(results[49].result.as_deref(), Some("50"));
    }

    #[test]
    fn summary_counts() {
        let expressions = vec!["1".to_string(), "(".to_string(), "3".to_string()];
        let summary = summarize(&evaluate_all(&expressions, &Evaluator::default()));
        assert_eq!(
            summary,
            BatchSummary {
                total: 3,
                succeeded: 2,
                failed: 1
            }
        );
    }
}

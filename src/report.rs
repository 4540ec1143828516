//! Report formatting for evaluation results.
//!
//! Pure functions: (evaluations, OutputFormat) → String.
//! No I/O, no side effects.

use crate::batch::summarize;
use crate::types::{Evaluation, OutputFormat};

/// Format a single evaluation, as printed by `eval`.
///
/// Human output is exactly what the display would show.
pub fn format_evaluation(evaluation: &Evaluation, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format!("{}\n", evaluation.display_value()),
        OutputFormat::Json => to_json(evaluation),
    }
}

/// Format a batch of evaluations, as printed by `batch`.
pub fn format_evaluations(evaluations: &[Evaluation], format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(evaluations),
        OutputFormat::Json => to_json(evaluations),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(evaluations: &[Evaluation]) -> String {
    let mut out = String::new();

    for evaluation in evaluations {
        match &evaluation.error {
            None => out.push_str(&format!(
                "{} = {}\n",
                evaluation.expression,
                evaluation.display_value()
            )),
            Some(reason) => out.push_str(&format!(
                "{} = {} ({})\n",
                evaluation.expression,
                evaluation.display_value(),
                reason
            )),
        }
    }

    let summary = summarize(evaluations);
    if !evaluations.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!(
        "{} evaluated, {} ok, {} failed\n",
        summary.total, summary.succeeded, summary.failed
    ));

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(mut json) => {
            json.push('\n');
            json
        }
        Err(e) => format!("{{\"error\": \"serialization failed: {}\"}}\n", e),
    }
}

// ============================================================================
// TESTS
// ============================================================================

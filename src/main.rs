//! keycalc CLI
//!
//! Evaluate arithmetic one expression at a time, in bulk, or on an
//! interactive terminal keypad.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use keycalc::batch::{evaluate_all, evaluate_all_with_progress, read_expressions, summarize};
use keycalc::config::{Config, load_config};
use keycalc::display::DisplayController;
use keycalc::eval::Evaluator;
use keycalc::logging::{self, LogTarget};
use keycalc::report::{format_evaluation, format_evaluations};
use keycalc::tui::run::run;
use keycalc::tui::state::App;
use keycalc::types::{Evaluation, OutputFormat};

/// Batches smaller than this finish before a progress bar is worth drawing.
const PROGRESS_THRESHOLD: usize = 1_000;

#[derive(Parser)]
#[command(name = "keycalc")]
#[command(about = "Keypad calculator with a safe arithmetic evaluator")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/keycalc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one expression and print what the display would show
    Eval {
        /// Expression, e.g. "42 * (3 + 7)" or "-5 + 3"
        #[arg(allow_hyphen_values = true)]
        expression: String,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Evaluate one expression per line from a file or stdin
    Batch {
        /// Input file (default: stdin)
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Open the interactive keypad
    Tui {
        /// Text to start with on the display
        #[arg(long, allow_hyphen_values = true)]
        initial: Option<String>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let target = match cli.command {
        Commands::Tui { .. } => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(cli.verbose, target) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Eval { expression, format } => cmd_eval(&config, &expression, format.into()),
        Commands::Batch { file, format } => cmd_batch(&config, file.as_deref(), format.into()),
        Commands::Tui { initial } => cmd_tui(&config, initial),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// PROGRESS HELPERS
// ============================================================================

fn progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_eval(config: &Config, expression: &str, format: OutputFormat) -> Result<(), String> {
    let mut calc = DisplayController::from_config(config).with_text(expression);
    let outcome = calc.calculate();
    let evaluation = Evaluation::from_result(expression, outcome);

    print!("{}", format_evaluation(&evaluation, format));

    match evaluation.error {
        None => Ok(()),
        Some(reason) => Err(reason),
    }
}

fn cmd_batch(config: &Config, file: Option<&Path>, format: OutputFormat) -> Result<(), String> {
    let input = read_input(file)?;
    let expressions = read_expressions(&input);
    let evaluator = Evaluator::new(config.eval.clone());

    info!(count = expressions.len(), "evaluating batch");

    let show_progress = format == OutputFormat::Human && expressions.len() >= PROGRESS_THRESHOLD;

    let evaluations: Vec<Evaluation> = if show_progress {
        let pb = progress_bar(expressions.len() as u64, "Evaluating...");
        let results = evaluate_all_with_progress(&expressions, &evaluator, || pb.inc(1));
        pb.finish_and_clear();
        results
    } else {
        evaluate_all(&expressions, &evaluator)
    };

    print!("{}", format_evaluations(&evaluations, format));

    let summary = summarize(&evaluations);
    if summary.failed > 0 {
        warn!(failed = summary.failed, "batch had failures");
        return Err(format!(
            "{} of {} expressions failed",
            summary.failed, summary.total
        ));
    }
    Ok(())
}

fn cmd_tui(config: &Config, initial: Option<String>) -> Result<(), String> {
    let mut calc = DisplayController::from_config(config);
    if let Some(text) = initial {
        calc = calc.with_text(text);
    }

    let app = run(App::new(calc)).map_err(|e| e.to_string())?;

    if let Some(last) = app.calc.history().last() {
        println!("{}", last.display());
    }
    Ok(())
}

// ============================================================================
// INPUT
// ============================================================================

fn read_input(file: Option<&Path>) -> Result<String, String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e)),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("cannot read stdin: {}", e))?;
            Ok(buf)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn expression_of(cli: Cli) -> String {
        match cli.command {
            Commands::Eval { expression, .. } => expression,
            _ => panic!("expected eval command"),
        }
    }

    #[test]
    fn eval_accepts_leading_minus() {
        let cli = Cli::try_parse_from(["keycalc", "eval", "-5+3"]).unwrap();
        assert_eq!(expression_of(cli), "-5+3");

        let cli = Cli::try_parse_from(["keycalc", "eval", "-2**2", "--format", "json"]).unwrap();
        assert_eq!(expression_of(cli), "-2**2");
    }

    #[test]
    fn eval_still_takes_global_flags() {
        let cli = Cli::try_parse_from(["keycalc", "-vv", "eval", "1+1"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(expression_of(cli), "1+1");
    }

    #[test]
    fn tui_initial_accepts_leading_minus() {
        let cli = Cli::try_parse_from(["keycalc", "tui", "--initial", "-3"]).unwrap();
        match cli.command {
            Commands::Tui { initial } => assert_eq!(initial.as_deref(), Some("-3")),
            _ => panic!("expected tui command"),
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

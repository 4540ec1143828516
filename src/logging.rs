//! Tracing setup.
//!
//! CLI commands log to stderr. The TUI owns the terminal, so it logs to
//! a file under the cache directory instead. `RUST_LOG` always wins over
//! the verbosity flag.

use std::io;
use std::path::PathBuf;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_DIR: &str = "keycalc";
const LOG_FILENAME: &str = "keycalc.log";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

/// Map `-v` count to a default filter directive.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Directory holding the TUI log file.
pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_DIR)
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbose: u8, target: LogTarget) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbose)));

    let result = match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(false))
            .with(filter)
            .try_init(),
        LogTarget::File => {
            let dir = log_dir();
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::never(&dir, LOG_FILENAME);
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(appender)
                        .with_ansi(false)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
        }
    };

    // Already initialized (tests, repeated calls): keep the first one.
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

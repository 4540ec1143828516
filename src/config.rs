//! Configuration for keycalc.
//!
//! Loaded from TOML. The default location is
//! `<config_dir>/keycalc/config.toml`; a missing default file means
//! defaults, a missing explicit file is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::types::DivisionMode;

/// Nesting limit for parentheses, signs and exponents.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Largest accepted `max_depth`. Each level costs a few stack frames in
/// both the parser and the evaluator.
pub const MAX_DEPTH_LIMIT: usize = 256;

/// Largest accepted `precision`. An `f64` carries at most 17 significant
/// decimal digits.
pub const MAX_PRECISION: u32 = 17;

/// Number of calculations kept in history.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

const CONFIG_DIR: &str = "keycalc";
const CONFIG_FILENAME: &str = "config.toml";

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub eval: EvalConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Arithmetic evaluation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EvalConfig {
    pub division_by_zero: DivisionMode,
    pub max_depth: usize,
    /// Fractional digits to round results to. `None` keeps full precision.
    pub precision: Option<u32>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            division_by_zero: DivisionMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            precision: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DisplayConfig {
    /// 0 disables history.
    pub history_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config {}: {key} = {value} exceeds the maximum of {max}", path.display())]
    OutOfRange {
        path: PathBuf,
        key: &'static str,
        value: u64,
        max: u64,
    },
}

// ============================================================================
// LOADING
// ============================================================================

/// Returns the default config file location, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Load configuration.
///
/// With an explicit path the file must exist. Without one, the default
/// location is tried and silently skipped when absent.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_from_path(&path),
        Some(path) => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
        None => Ok(Config::default()),
    }
}

/// Read and parse a config file.
pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content, path)?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Parse and validate config text. `path` is only used for error messages.
pub fn parse_config(content: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate(&config, path)?;
    Ok(config)
}

fn validate(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let out_of_range = |key: &'static str, value: u64, max: u64| ConfigError::OutOfRange {
        path: path.to_path_buf(),
        key,
        value,
        max,
    };

    if config.eval.max_depth > MAX_DEPTH_LIMIT {
        return Err(out_of_range(
            "eval.max_depth",
            config.eval.max_depth as u64,
            MAX_DEPTH_LIMIT as u64,
        ));
    }
    if let Some(precision) = config.eval.precision.filter(|&p| p > MAX_PRECISION) {
        return Err(out_of_range(
            "eval.precision",
            u64::from(precision),
            u64::from(MAX_PRECISION),
        ));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

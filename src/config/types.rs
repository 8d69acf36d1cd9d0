//! Configuration types.
//!
//! This module defines the library `Config` struct and the enums used for
//! logging and exit-code policy. CLI parsing lives in `cli.rs`.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_INVALID_FILE, DEFAULT_MAX_REDIRECTS, DEFAULT_OUTPUT_FILE, DEFAULT_SAME_DOMAIN_FILE,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, DEFAULT_VALID_FILE, DEFAULT_WORKER_COUNT,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Exit-code policy applied after a successful run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Always exit 0 when the run completes
    Never,
    /// Exit 2 if any URL ended up invalid/failed
    AnyInvalid,
    /// Exit 2 if any cross-domain redirect (potential open redirect) was found
    CrossDomain,
}

/// Where classified results are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Cross-domain redirects
    pub cross_domain: PathBuf,
    /// Same-domain redirects
    pub same_domain: PathBuf,
    /// Invalid or failed URLs
    pub invalid: PathBuf,
    /// Cross-domain redirects flagged as potential open redirects
    pub valid: PathBuf,
    /// Optional JSON Lines file with every record
    pub jsonl: Option<PathBuf>,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            cross_domain: PathBuf::from(DEFAULT_OUTPUT_FILE),
            same_domain: PathBuf::from(DEFAULT_SAME_DOMAIN_FILE),
            invalid: PathBuf::from(DEFAULT_INVALID_FILE),
            valid: PathBuf::from(DEFAULT_VALID_FILE),
            jsonl: None,
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use redirect_inspector::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("urls.txt"),
///     worker_count: 50,
///     max_redirects: 5,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// File to read URLs from (`-` for stdin)
    pub file: PathBuf,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Number of concurrent workers
    pub worker_count: usize,

    /// Maximum redirects followed per chain
    pub max_redirects: usize,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Whole-task retries for connection errors and timeouts (0 disables)
    pub retries: usize,

    /// Output destinations
    pub outputs: OutputPaths,

    /// Exit-code policy
    pub fail_on: FailOn,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("urls.txt"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            worker_count: DEFAULT_WORKER_COUNT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retries: 0,
            outputs: OutputPaths::default(),
            fail_on: FailOn::Never,
        }
    }
}

impl Config {
    /// Checks the values the core needs before any work starts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a zero worker count or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::InvalidWorkerCount(self.worker_count));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

//! Error type definitions.
//!
//! This module defines the per-task failure taxonomy and the error types for
//! process-fatal conditions (configuration, initialization, export).

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Invalid configuration. Always fatal at startup, never a per-task failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The worker pool needs at least one worker.
    #[error("worker count must be at least 1 (got {0})")]
    InvalidWorkerCount(usize),

    /// Per-request timeout must be strictly positive.
    #[error("timeout must be greater than zero seconds")]
    InvalidTimeout,
}

/// Failure to extract a registrable domain from a host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The host is empty or not a syntactically valid hostname.
    #[error("invalid host '{host}': {reason}")]
    InvalidHost {
        /// The host as given
        host: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The URL has no host component at all (e.g. `mailto:`).
    #[error("URL '{0}' has no host component")]
    MissingHost(String),
}

/// Errors raised while writing classified results.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Output file could not be created or written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Destination path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized.
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Stage at which a single URL task failed.
///
/// Every per-task error is mapped to exactly one of these; the stable
/// `as_str()` names are what output files and JSON records carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureStage {
    /// Malformed URL syntax, missing host or non-HTTP(S) scheme
    InvalidUrl,
    /// Registrable domain could not be extracted from a host
    InvalidHost,
    /// DNS failure, refused or reset connection
    ConnectionError,
    /// Request exceeded the configured timeout
    Timeout,
    /// Chain needed more hops than `max_redirects`
    TooManyRedirects,
    /// Malformed response or unsupported redirect target
    OtherHttpError,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureStage {
    /// Stable machine-readable name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStage::InvalidUrl => "INVALID_URL",
            FailureStage::InvalidHost => "INVALID_HOST",
            FailureStage::ConnectionError => "CONNECTION_ERROR",
            FailureStage::Timeout => "TIMEOUT",
            FailureStage::TooManyRedirects => "TOO_MANY_REDIRECTS",
            FailureStage::OtherHttpError => "OTHER_HTTP_ERROR",
        }
    }

    /// Human-readable description used in statistics output.
    pub fn description(&self) -> &'static str {
        match self {
            FailureStage::InvalidUrl => "Invalid URL",
            FailureStage::InvalidHost => "Invalid host",
            FailureStage::ConnectionError => "Connection error",
            FailureStage::Timeout => "Request timeout",
            FailureStage::TooManyRedirects => "Too many redirects",
            FailureStage::OtherHttpError => "Other HTTP error",
        }
    }

    /// Whether a whole-task retry has any chance of a different outcome.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FailureStage::ConnectionError | FailureStage::Timeout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_failure_stage_as_str() {
        assert_eq!(FailureStage::InvalidUrl.as_str(), "INVALID_URL");
        assert_eq!(
            FailureStage::TooManyRedirects.as_str(),
            "TOO_MANY_REDIRECTS"
        );
        assert_eq!(FailureStage::OtherHttpError.as_str(), "OTHER_HTTP_ERROR");
    }

    #[test]
    fn test_failure_stage_serializes_as_stable_name() {
        // The serde name and as_str() must never drift apart
        for stage in FailureStage::iter() {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage.as_str()));
        }
    }

    #[test]
    fn test_all_stages_have_description() {
        for stage in FailureStage::iter() {
            assert!(
                !stage.description().is_empty(),
                "{:?} should have a description",
                stage
            );
        }
    }

    #[test]
    fn test_transient_stages() {
        let transient: Vec<_> = FailureStage::iter().filter(|s| s.is_transient()).collect();
        assert_eq!(
            transient,
            vec![FailureStage::ConnectionError, FailureStage::Timeout]
        );
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::InvalidWorkerCount(0).to_string(),
            "worker count must be at least 1 (got 0)"
        );
        assert!(ConfigError::InvalidTimeout.to_string().contains("timeout"));
    }

    #[test]
    fn test_domain_error_message_names_host() {
        let err = DomainError::InvalidHost {
            host: "bad host".to_string(),
            reason: "invalid character",
        };
        assert_eq!(err.to_string(), "invalid host 'bad host': invalid character");
    }
}

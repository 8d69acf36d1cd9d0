//! Error handling and processing statistics.
//!
//! This module provides:
//! - The per-task failure taxonomy (`FailureStage`)
//! - Fatal error types for configuration, initialization and export
//! - Categorization of `reqwest` transport errors
//! - Thread-safe processing statistics
//! - The backoff strategy for optional whole-task retries

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, describe_reqwest_error, get_retry_strategy};
pub use stats::ProcessingStats;
pub use types::{ConfigError, DomainError, ExportError, FailureStage, InitializationError};

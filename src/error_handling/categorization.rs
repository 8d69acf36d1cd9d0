//! Error categorization and retry strategy.
//!
//! Maps transport errors from `reqwest` onto the per-task `FailureStage`
//! taxonomy and builds the backoff strategy for optional whole-task retries.

use std::error::Error as StdError;
use std::io;
use std::time::Duration;

use tokio_retry::strategy::ExponentialBackoff;

use super::types::FailureStage;

/// Creates an exponential backoff retry strategy limited to `retries` attempts.
///
/// Returns an empty iterator when `retries == 0`, so a `RetryIf` built on it
/// runs the action exactly once.
pub fn get_retry_strategy(retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(retries)
}

/// Categorizes a `reqwest::Error` into a `FailureStage`.
///
/// Timeouts win over everything else. Connect errors (DNS, refused) are
/// connection errors, as are request errors whose source chain bottoms out in
/// a reset/aborted/EOF I/O error. Anything else at the HTTP layer (builder
/// errors, malformed responses, decode errors) is `OtherHttpError`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FailureStage {
    if error.is_timeout() || chain_has_timeout(error) {
        FailureStage::Timeout
    } else if error.is_connect() || chain_has_connection_io_error(error) {
        FailureStage::ConnectionError
    } else if error.is_request() && message_mentions_resolution(error) {
        FailureStage::ConnectionError
    } else {
        FailureStage::OtherHttpError
    }
}

fn chain_has_timeout(error: &(dyn StdError + 'static)) -> bool {
    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::TimedOut {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

fn chain_has_connection_io_error(error: &(dyn StdError + 'static)) -> bool {
    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionRefused
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::NotConnected
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

fn message_mentions_resolution(error: &reqwest::Error) -> bool {
    let mut msg = error.to_string().to_lowercase();
    let mut source = error.source();
    while let Some(cause) = source {
        msg.push(' ');
        msg.push_str(&cause.to_string().to_lowercase());
        source = cause.source();
    }
    msg.contains("dns")
        || msg.contains("failed to lookup address")
        || msg.contains("name resolution")
        || msg.contains("connection closed")
}

/// Builds a non-empty detail string for a transport error, including its causes.
pub fn describe_reqwest_error(error: &reqwest::Error) -> String {
    let mut detail = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !detail.contains(&text) {
            detail.push_str(": ");
            detail.push_str(&text);
        }
        source = cause.source();
    }
    if detail.is_empty() {
        detail.push_str("unknown HTTP error");
    }
    detail
}

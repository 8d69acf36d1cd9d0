//! HTTP redirect chain resolution.
//!
//! This module follows redirect chains manually (the client has automatic
//! redirects disabled) so every hop can be observed. The walk is a linear
//! state machine:
//!
//! ```text
//! Start ──▶ Requesting(url, 0) ──▶ Requesting(next, 1) ──▶ … ──▶ Resolved
//!   │              │
//!   ▼              ▼
//! Failed        Failed (ConnectionError | Timeout | TooManyRedirects | OtherHttpError)
//! ```

use std::time::Duration;

use reqwest::header::{HeaderValue, LOCATION};
use reqwest::Url;

use super::types::{ChainOutcome, RedirectHop};
use crate::config::{MAX_CHAIN_DETAIL_HOPS, MAX_REDIRECT_BODY_BYTES, REDIRECT_STATUS_CODES};
use crate::error_handling::{categorize_reqwest_error, describe_reqwest_error, FailureStage};

enum ChainState {
    Start,
    Requesting { current: Url, hop_index: usize },
    Terminal(ChainOutcome),
}

/// Resolves the redirect chain for a URL.
///
/// # Arguments
///
/// * `start_url` - The URL as read from input
/// * `max_redirects` - Maximum number of redirects to follow
/// * `timeout` - Bound on each individual request (connect + response)
/// * `client` - HTTP client with redirects disabled
///
/// Never returns an error: every failure is folded into `ChainOutcome::Failed`.
pub async fn resolve_redirect_chain(
    start_url: &str,
    max_redirects: usize,
    timeout: Duration,
    client: &reqwest::Client,
) -> ChainOutcome {
    let mut hops: Vec<RedirectHop> = Vec::new();
    let mut state = ChainState::Start;

    loop {
        state = match state {
            ChainState::Start => match parse_start_url(start_url) {
                Ok(url) => ChainState::Requesting {
                    current: url,
                    hop_index: 0,
                },
                Err(detail) => failed(FailureStage::InvalidUrl, detail, &mut hops),
            },
            ChainState::Requesting { current, hop_index } => {
                request_hop(current, hop_index, max_redirects, timeout, client, &mut hops).await
            }
            ChainState::Terminal(outcome) => return outcome,
        };
    }
}

async fn request_hop(
    current: Url,
    hop_index: usize,
    max_redirects: usize,
    timeout: Duration,
    client: &reqwest::Client,
    hops: &mut Vec<RedirectHop>,
) -> ChainState {
    log::trace!("Requesting hop {} for {}", hop_index, current);

    let mut response = match client.get(current.clone()).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            let stage = categorize_reqwest_error(&e);
            log::debug!("Request to {} failed ({}): {}", current, stage, e);
            return failed(stage, describe_reqwest_error(&e), hops);
        }
    };

    let status_code = response.status().as_u16();
    hops.push(RedirectHop {
        url: current.to_string(),
        status_code,
    });

    let location = if REDIRECT_STATUS_CODES.contains(&status_code) {
        response.headers().get(LOCATION).cloned()
    } else {
        None
    };

    let Some(location) = location else {
        if REDIRECT_STATUS_CODES.contains(&status_code) {
            log::warn!(
                "Redirect status {} for {} but no Location header",
                status_code,
                current
            );
        }
        return ChainState::Terminal(ChainOutcome::Resolved {
            final_url: current.to_string(),
            hops: std::mem::take(hops),
        });
    };

    let next = match next_url(&current, &location) {
        Ok(next) => next,
        Err(detail) => return failed(FailureStage::OtherHttpError, detail, hops),
    };

    if hop_index + 1 > max_redirects {
        let detail = too_many_redirects_detail(max_redirects, hops, &next);
        return failed(FailureStage::TooManyRedirects, detail, hops);
    }

    // Unread bodies keep hyper from returning the connection to the pool
    let drained = drain_body(&mut response, MAX_REDIRECT_BODY_BYTES).await;
    log::trace!("Discarded {} body bytes from {}", drained, current);

    ChainState::Requesting {
        current: next,
        hop_index: hop_index + 1,
    }
}

fn failed(stage: FailureStage, detail: String, hops: &mut Vec<RedirectHop>) -> ChainState {
    ChainState::Terminal(ChainOutcome::Failed {
        stage,
        detail,
        hops: std::mem::take(hops),
    })
}

/// Reads and discards the response body, stopping once `limit` bytes have
/// been read. Returns the number of bytes read.
async fn drain_body(response: &mut reqwest::Response, limit: usize) -> usize {
    let mut drained = 0usize;
    while drained < limit {
        match response.chunk().await {
            Ok(Some(chunk)) => drained += chunk.len(),
            Ok(None) => break,
            Err(e) => {
                log::trace!("Stopped reading redirect body: {}", e);
                break;
            }
        }
    }
    drained
}

/// Validates that the input is an absolute HTTP(S) URL with a host.
fn parse_start_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| format!("Invalid URL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(format!(
                "Invalid URL '{}': unsupported scheme '{}'",
                raw, other
            ))
        }
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(format!("Invalid URL '{}': missing host", raw));
    }
    Ok(url)
}

/// Resolves a `Location` header value against the current URL.
fn next_url(current: &Url, location: &HeaderValue) -> Result<Url, String> {
    let raw = std::str::from_utf8(location.as_bytes())
        .map_err(|_| format!("Location header from {} is not valid UTF-8", current))?;
    let next = current
        .join(raw.trim())
        .map_err(|e| format!("Invalid Location '{}' from {}: {}", raw, current, e))?;
    match next.scheme() {
        "http" | "https" => Ok(next),
        other => Err(format!(
            "Unsupported redirect target scheme '{}' in Location '{}' from {}",
            other, raw, current
        )),
    }
}

fn too_many_redirects_detail(max_redirects: usize, hops: &[RedirectHop], next: &Url) -> String {
    let mut chain: Vec<String> = hops
        .iter()
        .take(MAX_CHAIN_DETAIL_HOPS)
        .map(|hop| format!("{} [{}]", hop.url, hop.status_code))
        .collect();
    if hops.len() > MAX_CHAIN_DETAIL_HOPS {
        chain.push(format!("… {} more", hops.len() - MAX_CHAIN_DETAIL_HOPS));
    }
    chain.push(next.to_string());
    format!(
        "Exceeded maximum of {} redirects: {}",
        max_redirects,
        chain.join(" -> ")
    )
}

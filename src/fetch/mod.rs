//! Redirect chain resolution.
//!
//! `RedirectResolver` owns a shared, connection-pooling HTTP client (with
//! automatic redirects disabled) and the per-request settings, and turns a raw
//! input URL into a `ChainOutcome`. It never touches shared mutable state and
//! is safe to call from every worker concurrently.

mod redirects;
mod types;

use std::sync::Arc;
use std::time::Duration;

use tokio_retry::Retry;

use crate::config::Config;
use crate::error_handling::{get_retry_strategy, InitializationError};
use crate::initialization::init_redirect_client;

pub use redirects::resolve_redirect_chain;
pub use types::{ChainOutcome, RedirectHop};

/// Per-request settings used by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Maximum number of redirects followed before giving up
    pub max_redirects: usize,
    /// Bound on each individual request (connect + response)
    pub timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl From<&Config> for ResolverSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_redirects: config.max_redirects,
            timeout: Duration::from_secs(config.timeout_seconds),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Follows redirect chains hop by hop.
#[derive(Debug, Clone)]
pub struct RedirectResolver {
    client: Arc<reqwest::Client>,
    settings: ResolverSettings,
}

impl RedirectResolver {
    /// Creates a resolver with its own redirect-disabled client.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(settings: ResolverSettings) -> Result<Self, InitializationError> {
        let client = init_redirect_client(&settings)?;
        Ok(Self { client, settings })
    }

    /// Creates a resolver around an existing client.
    ///
    /// The client must have automatic redirects disabled
    /// (`reqwest::redirect::Policy::none()`), otherwise intermediate hops are
    /// invisible and every chain looks like a single request.
    pub fn with_client(client: Arc<reqwest::Client>, settings: ResolverSettings) -> Self {
        Self { client, settings }
    }

    /// Walks the redirect chain of `url` once.
    pub async fn resolve(&self, url: &str) -> ChainOutcome {
        resolve_redirect_chain(
            url,
            self.settings.max_redirects,
            self.settings.timeout,
            &self.client,
        )
        .await
    }

    /// Walks the chain, re-running the whole task up to `retries` more times
    /// while it fails with a transient stage (connection error or timeout).
    ///
    /// Returns the final outcome and the number of retries performed.
    pub async fn resolve_with_retry(&self, url: &str, retries: usize) -> (ChainOutcome, usize) {
        if retries == 0 {
            return (self.resolve(url).await, 0);
        }

        let mut attempts = 0usize;
        let result = Retry::spawn(get_retry_strategy(retries), || {
            attempts += 1;
            async move {
                let outcome = self.resolve(url).await;
                match outcome.failure_stage() {
                    Some(stage) if stage.is_transient() => {
                        log::debug!("Transient failure ({}) for {}, may retry", stage, url);
                        Err(outcome)
                    }
                    _ => Ok(outcome),
                }
            }
        })
        .await;

        let outcome = match result {
            Ok(outcome) | Err(outcome) => outcome,
        };
        (outcome, attempts.saturating_sub(1))
    }
}

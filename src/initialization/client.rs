//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::error_handling::InitializationError;
use crate::fetch::ResolverSettings;

/// Initializes the shared HTTP client for redirect resolution.
///
/// Creates a `reqwest::Client` with redirects disabled so the resolver can
/// observe every hop itself. The client keeps a connection pool, so workers
/// reuse connections to hosts they have already visited.
///
/// # Arguments
///
/// * `settings` - Resolver settings providing user-agent and timeout
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_redirect_client(
    settings: &ResolverSettings,
) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(settings.timeout)
        .connect_timeout(settings.timeout)
        .user_agent(settings.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_init_redirect_client() {
        let settings = ResolverSettings {
            max_redirects: 3,
            timeout: Duration::from_secs(2),
            user_agent: "redirect_inspector-test/1.0".to_string(),
        };
        assert!(init_redirect_client(&settings).is_ok());
    }
}

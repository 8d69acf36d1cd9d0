// Shared test helpers for mock servers and resolver setup.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use redirect_inspector::{RedirectResolver, ResolverSettings};

/// Resolver settings with a test User-Agent.
#[allow(dead_code)] // Used by other test files
pub fn test_settings(max_redirects: usize) -> ResolverSettings {
    ResolverSettings {
        max_redirects,
        timeout: Duration::from_secs(5),
        user_agent: "redirect_inspector-test/1.0".to_string(),
    }
}

/// Resolver whose client maps every host in `hosts` to `addr`.
///
/// Lets hostname-based scenarios (`short.test`, `long.test`, ...) run against a
/// single local mock server. URLs must still carry the mock server's port.
#[allow(dead_code)] // Used by other test files
pub fn resolver_with_hosts(
    addr: SocketAddr,
    hosts: &[&str],
    max_redirects: usize,
) -> Arc<RedirectResolver> {
    let mut builder = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(5));
    for host in hosts {
        builder = builder.resolve(host, addr);
    }
    let client = builder.build().expect("Failed to create client");
    Arc::new(RedirectResolver::with_client(
        Arc::new(client),
        test_settings(max_redirects),
    ))
}

/// Resolver with its own default client.
#[allow(dead_code)] // Used by other test files
pub fn local_resolver(max_redirects: usize) -> Arc<RedirectResolver> {
    Arc::new(RedirectResolver::new(test_settings(max_redirects)).expect("Failed to create resolver"))
}

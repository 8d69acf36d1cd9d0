//! Configuration constants.
//!
//! Defaults for the worker pool and resolver, the redirect status codes the
//! resolver follows, and the whole-task retry backoff parameters.

/// Default number of concurrent workers
pub const DEFAULT_WORKER_COUNT: usize = 20;
/// Default maximum number of redirect hops followed per chain
pub const DEFAULT_MAX_REDIRECTS: usize = 10;
/// Default per-request timeout in seconds (connect + read)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Progress logging interval in seconds
pub const LOGGING_INTERVAL: u64 = 5;

/// Default User-Agent string for HTTP requests.
///
/// Some servers answer bots differently (or not at all), so a browser-like
/// string is sent unless `--user-agent` overrides it.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// HTTP status codes treated as redirects when a `Location` header is present.
pub const REDIRECT_STATUS_CODES: [u16; 5] = [301, 302, 303, 307, 308];

/// Maximum length of the chain summary embedded in a failure detail.
pub const MAX_CHAIN_DETAIL_HOPS: usize = 12;

/// Most body bytes read from a followed redirect before moving on. Bodies
/// read to the end let the connection be reused; larger ones are abandoned.
pub const MAX_REDIRECT_BODY_BYTES: usize = 64 * 1024;

// Whole-task retry strategy (only used when `retries > 0`)
/// Initial delay in milliseconds before the first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 15;

// Default output locations
/// Cross-domain redirects
pub const DEFAULT_OUTPUT_FILE: &str = "redirected_domains.txt";
/// Same-domain redirects
pub const DEFAULT_SAME_DOMAIN_FILE: &str = "same_domain_redirects.txt";
/// Invalid or failed URLs
pub const DEFAULT_INVALID_FILE: &str = "invalid_or_failed.txt";
/// Cross-domain redirects flagged as potential open redirects
pub const DEFAULT_VALID_FILE: &str = "valid_redirects.txt";

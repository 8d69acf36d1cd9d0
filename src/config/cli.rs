//! Command-line options.

use std::path::PathBuf;

use clap::Parser;

use crate::config::constants::{
    DEFAULT_INVALID_FILE, DEFAULT_MAX_REDIRECTS, DEFAULT_OUTPUT_FILE, DEFAULT_SAME_DOMAIN_FILE,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, DEFAULT_VALID_FILE, DEFAULT_WORKER_COUNT,
};
use crate::config::types::{Config, FailOn, LogFormat, LogLevel, OutputPaths};

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// redirect_inspector urls.txt
///
/// # More workers, shorter chains, faster timeout
/// redirect_inspector urls.txt -t 50 -r 5 --timeout 5
///
/// # Read from stdin and also emit JSON Lines
/// cat urls.txt | redirect_inspector - --jsonl results.jsonl
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "redirect_inspector",
    version,
    about = "Check and categorize URL redirects concurrently."
)]
pub struct Opt {
    /// Path to input file containing URLs (one per line), or `-` for stdin
    #[arg(value_parser)]
    pub input_file: PathBuf,

    /// Output file for cross-domain redirects
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Output file for same-domain redirects
    #[arg(short = 's', long, default_value = DEFAULT_SAME_DOMAIN_FILE)]
    pub same_domain_output: PathBuf,

    /// Output file for invalid or failed URLs
    #[arg(short = 'x', long, default_value = DEFAULT_INVALID_FILE)]
    pub invalid_output: PathBuf,

    /// Output file for cross-domain redirects (potential open redirects)
    #[arg(short = 'v', long, default_value = DEFAULT_VALID_FILE)]
    pub valid_output: PathBuf,

    /// Also write every record as JSON Lines to this file
    #[arg(long)]
    pub jsonl: Option<PathBuf>,

    /// Number of worker threads
    #[arg(short = 't', long, default_value_t = DEFAULT_WORKER_COUNT)]
    pub threads: usize,

    /// Maximum number of redirects to follow
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub redirects: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Whole-task retries for connection errors and timeouts
    #[arg(long, default_value_t = 0)]
    pub retries: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Exit with code 2 when: never|any-invalid|cross-domain
    #[arg(long, value_enum, default_value_t = FailOn::Never)]
    pub fail_on: FailOn,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Config {
            file: opt.input_file,
            log_level: opt.log_level,
            log_format: opt.log_format,
            worker_count: opt.threads,
            max_redirects: opt.redirects,
            timeout_seconds: opt.timeout,
            user_agent: opt.user_agent,
            retries: opt.retries,
            outputs: OutputPaths {
                cross_domain: opt.output,
                same_domain: opt.same_domain_output,
                invalid: opt.invalid_output,
                valid: opt.valid_output,
                jsonl: opt.jsonl,
            },
            fail_on: opt.fail_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opt_defaults() {
        let opt = Opt::try_parse_from(["redirect_inspector", "urls.txt"]).unwrap();
        assert_eq!(opt.input_file, PathBuf::from("urls.txt"));
        assert_eq!(opt.threads, 20);
        assert_eq!(opt.redirects, 10);
        assert_eq!(opt.timeout, 10);
        assert_eq!(opt.output, PathBuf::from("redirected_domains.txt"));
        assert_eq!(opt.valid_output, PathBuf::from("valid_redirects.txt"));
        assert!(opt.jsonl.is_none());
    }

    #[test]
    fn test_opt_short_flags() {
        let opt = Opt::try_parse_from([
            "redirect_inspector",
            "urls.txt",
            "-t",
            "50",
            "-r",
            "3",
            "-o",
            "cross.txt",
            "-s",
            "same.txt",
            "-x",
            "bad.txt",
            "-v",
            "valid.txt",
        ])
        .unwrap();
        assert_eq!(opt.threads, 50);
        assert_eq!(opt.redirects, 3);
        assert_eq!(opt.output, PathBuf::from("cross.txt"));
        assert_eq!(opt.same_domain_output, PathBuf::from("same.txt"));
        assert_eq!(opt.invalid_output, PathBuf::from("bad.txt"));
        assert_eq!(opt.valid_output, PathBuf::from("valid.txt"));
    }

    #[test]
    fn test_opt_rejects_negative_timeout() {
        let result =
            Opt::try_parse_from(["redirect_inspector", "urls.txt", "--timeout", "-5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_opt_requires_input_file() {
        assert!(Opt::try_parse_from(["redirect_inspector"]).is_err());
    }

    #[test]
    fn test_opt_into_config() {
        let opt = Opt::try_parse_from([
            "redirect_inspector",
            "-",
            "--timeout",
            "3",
            "--retries",
            "2",
            "--jsonl",
            "out.jsonl",
            "--fail-on",
            "cross-domain",
        ])
        .unwrap();
        let config = Config::from(opt);
        assert_eq!(config.file, PathBuf::from("-"));
        assert_eq!(config.timeout_seconds, 3);
        assert_eq!(config.retries, 2);
        assert_eq!(config.outputs.jsonl, Some(PathBuf::from("out.jsonl")));
        assert_eq!(config.fail_on, FailOn::CrossDomain);
    }
}

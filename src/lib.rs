//! redirect_inspector library: concurrent redirect-chain inspection
//!
//! This library follows the HTTP redirect chain of every input URL, one hop at
//! a time, and classifies where each chain ends: on a different registrable
//! domain (a potential open redirect), on the same registrable domain, or in a
//! failure.
//!
//! # Example
//!
//! ```no_run
//! use redirect_inspector::{run_inspection, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("urls.txt"),
//!     worker_count: 50,
//!     max_redirects: 5,
//!     ..Default::default()
//! };
//!
//! let report = run_inspection(config).await?;
//! println!("{} cross-domain, {} same-domain, {} invalid",
//!          report.cross_domain, report.same_domain, report.invalid);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod classify;
pub mod collector;
pub mod config;
pub mod domain;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod input;
pub mod pool;

// Re-export public API
pub use app::evaluate_exit_code;
pub use classify::{classify, Category, Classification};
pub use collector::{AggregatedReport, ClassifiedTask, ResultCollector};
pub use config::{Config, FailOn, LogFormat, LogLevel, OutputPaths};
pub use error_handling::FailureStage;
pub use fetch::{ChainOutcome, RedirectHop, RedirectResolver, ResolverSettings};
pub use pool::{run_pool, PoolConfig, PoolSummary, UrlTask};
pub use run::{run_inspection, run_inspection_with_cancel, InspectionReport};

// Internal run module (contains the main inspection flow)
mod run {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use log::{info, warn};
    use tokio_util::sync::CancellationToken;

    use crate::app::{
        log_progress, print_statistics, print_written_files, shutdown_gracefully,
        spawn_progress_logger,
    };
    use crate::collector::{AggregatedReport, ResultCollector};
    use crate::config::{Config, LOGGING_INTERVAL};
    use crate::error_handling::ProcessingStats;
    use crate::export::{write_reports, WrittenFile};
    use crate::fetch::{RedirectResolver, ResolverSettings};
    use crate::input::load_tasks;
    use crate::pool::{run_pool, PoolConfig};

    /// Results of an inspection run.
    ///
    /// Contains summary counts, the classified results and the files written.
    #[derive(Debug, Clone)]
    pub struct InspectionReport {
        /// Number of URLs read from the input
        pub total_urls: usize,
        /// Chains ending on a different registrable domain
        pub cross_domain: usize,
        /// Chains staying on the original registrable domain
        pub same_domain: usize,
        /// Failed URLs
        pub invalid: usize,
        /// URLs never processed because the run was cancelled
        pub skipped: usize,
        /// Whether the run was cancelled before the input was exhausted
        pub cancelled: bool,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Classified results, each category in input order
        pub results: AggregatedReport,
        /// Report files that were written
        pub written: Vec<WrittenFile>,
    }

    /// Runs an inspection with the provided configuration.
    ///
    /// This is the main entry point for the library. It reads URLs from the
    /// input file, resolves and classifies them concurrently, and writes the
    /// per-category reports.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The configuration is invalid
    /// - The input file cannot be opened or read
    /// - The HTTP client cannot be built
    /// - A report file cannot be written
    ///
    /// Per-URL failures are never errors here; they are reported as invalid
    /// results.
    pub async fn run_inspection(config: Config) -> Result<InspectionReport> {
        run_inspection_with_cancel(config, CancellationToken::new()).await
    }

    /// Same as [`run_inspection`], stopping early when `cancel` fires.
    ///
    /// URLs already being processed finish; the rest are skipped. Whatever was
    /// classified is still written.
    pub async fn run_inspection_with_cancel(
        config: Config,
        cancel: CancellationToken,
    ) -> Result<InspectionReport> {
        config.validate().context("Invalid configuration")?;

        let tasks = load_tasks(&config.file).await?;
        let total_urls = tasks.len();

        let resolver = Arc::new(
            RedirectResolver::new(ResolverSettings::from(&config))
                .context("Failed to initialize HTTP client")?,
        );
        let collector = Arc::new(ResultCollector::new());
        let stats = Arc::new(ProcessingStats::new());

        let start_time = Instant::now();
        let cancel_logging = CancellationToken::new();
        let logging_task = spawn_progress_logger(
            start_time,
            Arc::clone(&collector),
            total_urls,
            Duration::from_secs(LOGGING_INTERVAL),
            cancel_logging.clone(),
        );

        let pool_result = run_pool(
            tasks,
            &PoolConfig::from(&config),
            resolver,
            Arc::clone(&collector),
            Arc::clone(&stats),
            cancel,
        )
        .await;

        shutdown_gracefully(cancel_logging, Some(logging_task)).await;
        let summary = pool_result.context("Failed to start worker pool")?;

        log_progress(start_time, collector.processed(), total_urls);
        if summary.cancelled {
            warn!(
                "Run cancelled: {} URLs were not processed",
                summary.skipped
            );
        }

        let elapsed_seconds = start_time.elapsed().as_secs_f64();

        let mut results = match Arc::try_unwrap(collector) {
            Ok(collector) => collector.into_report(),
            Err(shared) => shared.snapshot(),
        };
        results.sort_by_input_order();

        let written =
            write_reports(&results, &config.outputs).context("Failed to write results")?;

        print_statistics(&stats);
        print_written_files(&written);
        info!(
            "Processed {} URL{} in {:.1}s",
            results.processed,
            if results.processed == 1 { "" } else { "s" },
            elapsed_seconds
        );

        Ok(InspectionReport {
            total_urls,
            cross_domain: results.cross_domain.len(),
            same_domain: results.same_domain.len(),
            invalid: results.invalid.len(),
            skipped: summary.skipped,
            cancelled: summary.cancelled,
            elapsed_seconds,
            results,
            written,
        })
    }
}

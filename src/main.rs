//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `redirect_inspector` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Ctrl-C cancellation
//! - User-facing output formatting and exit codes
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use redirect_inspector::config::Opt;
use redirect_inspector::initialization::init_logger_with;
use redirect_inspector::{evaluate_exit_code, run_inspection_with_cancel, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::from(Opt::parse());

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received, finishing in-flight URLs");
            cancel_on_signal.cancel();
        }
    });

    let fail_on = config.fail_on;
    match run_inspection_with_cancel(config, cancel).await {
        Ok(report) => {
            let processed = report.total_urls.saturating_sub(report.skipped);
            println!(
                "Processed {} URL{} ({} cross-domain, {} same-domain, {} invalid) in {:.1}s",
                processed,
                if processed == 1 { "" } else { "s" },
                report.cross_domain,
                report.same_domain,
                report.invalid,
                report.elapsed_seconds
            );
            for file in &report.written {
                println!("  {}", file.path.display());
            }
            let code = evaluate_exit_code(fail_on, &report);
            if code != 0 {
                process::exit(code);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("redirect_inspector error: {:#}", e);
            process::exit(1);
        }
    }
}

//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureStage, ProcessingStats};
use crate::export::WrittenFile;

/// Prints category counts and per-stage failure counts to the log.
pub fn print_statistics(stats: &ProcessingStats) {
    info!(
        "Results: {} cross-domain, {} same-domain, {} invalid",
        stats.cross_domain_count(),
        stats.same_domain_count(),
        stats.total_failures()
    );

    let total_failures = stats.total_failures();
    if total_failures > 0 {
        info!("Failure Counts ({} total):", total_failures);
        for stage in FailureStage::iter() {
            let count = stats.get_failure_count(stage);
            if count > 0 {
                info!("   {} ({}): {}", stage.as_str(), stage.description(), count);
            }
        }
    }

    let retries = stats.retry_count();
    if retries > 0 {
        info!("Retries: {}", retries);
    }
}

/// Logs where each report was written.
pub fn print_written_files(written: &[WrittenFile]) {
    if written.is_empty() {
        info!("No results to write");
        return;
    }
    info!("Results written to:");
    for file in written {
        info!(
            "  {:?}: {} ({} records)",
            file.kind,
            file.path.display(),
            file.records
        );
    }
}

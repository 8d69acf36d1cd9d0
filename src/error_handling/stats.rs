//! Processing statistics tracking.
//!
//! Thread-safe counters for failure stages and outcome categories, updated by
//! every worker as tasks complete.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FailureStage;

/// Thread-safe processing statistics tracker.
///
/// All counters are atomics initialized to zero on creation, so the struct can
/// be shared across workers behind an `Arc` without a lock.
pub struct ProcessingStats {
    failures: HashMap<FailureStage, AtomicUsize>,
    cross_domain: AtomicUsize,
    same_domain: AtomicUsize,
    retries: AtomicUsize,
}

impl ProcessingStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for stage in FailureStage::iter() {
            failures.insert(stage, AtomicUsize::new(0));
        }

        ProcessingStats {
            failures,
            cross_domain: AtomicUsize::new(0),
            same_domain: AtomicUsize::new(0),
            retries: AtomicUsize::new(0),
        }
    }

    /// Increment the counter for a failure stage.
    pub fn increment_failure(&self, stage: FailureStage) {
        if let Some(counter) = self.failures.get(&stage) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                stage
            );
        }
    }

    /// Count one cross-domain result.
    pub fn increment_cross_domain(&self) {
        self.cross_domain.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one same-domain result.
    pub fn increment_same_domain(&self) {
        self.same_domain.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one whole-task retry.
    pub fn increment_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the count for a failure stage.
    pub fn get_failure_count(&self, stage: FailureStage) -> usize {
        self.failures
            .get(&stage)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Cross-domain results so far.
    pub fn cross_domain_count(&self) -> usize {
        self.cross_domain.load(Ordering::SeqCst)
    }

    /// Same-domain results so far.
    pub fn same_domain_count(&self) -> usize {
        self.same_domain.load(Ordering::SeqCst)
    }

    /// Retries performed so far.
    pub fn retry_count(&self) -> usize {
        self.retries.load(Ordering::SeqCst)
    }

    /// Total failures across every stage.
    pub fn total_failures(&self) -> usize {
        FailureStage::iter()
            .map(|stage| self.get_failure_count(stage))
            .sum()
    }

    /// Total classified tasks (cross-domain + same-domain + failures).
    pub fn total_completed(&self) -> usize {
        self.cross_domain_count() + self.same_domain_count() + self.total_failures()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

//! Result collection.
//!
//! Workers hand every `ClassifiedTask` to a shared `ResultCollector`, whose
//! single mutex is the only way into the aggregated collections.

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::classify::{Category, Classification};
use crate::pool::UrlTask;

/// A classification paired with the task it came from.
///
/// Carries the input position so reports can be put back into input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClassifiedTask {
    /// Position of the URL in the input
    pub id: usize,
    /// The URL as read from input
    pub url: String,
    /// What happened to it
    #[serde(flatten)]
    pub classification: Classification,
}

impl ClassifiedTask {
    /// Pairs `classification` with the task it was produced for.
    pub fn new(task: UrlTask, classification: Classification) -> Self {
        Self {
            id: task.id,
            url: task.url,
            classification,
        }
    }

    /// Category this result is filed under.
    pub fn category(&self) -> Category {
        self.classification.category()
    }
}

/// Classified results of a run, split by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedReport {
    /// Chains ending on a different registrable domain
    pub cross_domain: Vec<ClassifiedTask>,
    /// Chains staying on the original registrable domain
    pub same_domain: Vec<ClassifiedTask>,
    /// Failed tasks
    pub invalid: Vec<ClassifiedTask>,
    /// Number of submitted results
    pub processed: usize,
}

impl AggregatedReport {
    /// Appends a result to the collection for its category.
    fn push(&mut self, result: ClassifiedTask) {
        match result.category() {
            Category::CrossDomain => self.cross_domain.push(result),
            Category::SameDomain => self.same_domain.push(result),
            Category::Invalid => self.invalid.push(result),
        }
        self.processed += 1;
    }

    /// Combined size of the three collections.
    pub fn total(&self) -> usize {
        self.cross_domain.len() + self.same_domain.len() + self.invalid.len()
    }

    /// Restores input order within every category.
    pub fn sort_by_input_order(&mut self) {
        self.cross_domain.sort_by_key(|r| r.id);
        self.same_domain.sort_by_key(|r| r.id);
        self.invalid.sort_by_key(|r| r.id);
    }

    /// Every result, across categories, in input order.
    pub fn all_in_input_order(&self) -> Vec<&ClassifiedTask> {
        let mut all: Vec<&ClassifiedTask> = self
            .cross_domain
            .iter()
            .chain(self.same_domain.iter())
            .chain(self.invalid.iter())
            .collect();
        all.sort_by_key(|r| r.id);
        all
    }
}

/// Synchronized accumulator shared by all workers.
#[derive(Debug, Default)]
pub struct ResultCollector {
    inner: Mutex<AggregatedReport>,
}

impl ResultCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one classified task. Safe to call concurrently.
    pub fn submit(&self, result: ClassifiedTask) {
        self.lock().push(result);
    }

    /// Point-in-time copy of the aggregated results.
    ///
    /// Complete only once the pool has finished; earlier calls see a partial view.
    pub fn snapshot(&self) -> AggregatedReport {
        self.lock().clone()
    }

    /// Number of results submitted so far.
    pub fn processed(&self) -> usize {
        self.lock().processed
    }

    /// Consumes the collector and returns the aggregated results.
    pub fn into_report(self) -> AggregatedReport {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, AggregatedReport> {
        // A panic while holding the lock cannot leave a half-pushed entry
        // behind, so a poisoned report is still consistent
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

//! Worker pool.
//!
//! A fixed number of workers pull `UrlTask`s from one FIFO queue and take each
//! task through resolve → classify → submit before pulling the next. The
//! queue is a bounded channel (capacity = worker count) fed by a separate
//! task, so input is never buffered far ahead of the workers.
//!
//! Cancellation is cooperative: once the token fires the feeder stops
//! queueing and idle workers stop dequeuing, while tasks already in flight run
//! to completion and are still submitted.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::classify::{classify, Classification};
use crate::collector::{ClassifiedTask, ResultCollector};
use crate::config::Config;
use crate::error_handling::{ConfigError, ProcessingStats};
use crate::fetch::RedirectResolver;

/// One input URL and its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTask {
    /// Zero-based position in the input
    pub id: usize,
    /// URL exactly as read (already trimmed)
    pub url: String,
}

impl UrlTask {
    /// Creates a task for the URL at input position `id`.
    pub fn new(id: usize, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
        }
    }
}

/// Builds tasks from URLs, numbering them in order.
pub fn tasks_from_urls<I, S>(urls: I) -> Vec<UrlTask>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    urls.into_iter()
        .enumerate()
        .map(|(id, url)| UrlTask::new(id, url))
        .collect()
}

/// Pool sizing and per-task policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of concurrent workers (must be at least 1)
    pub worker_count: usize,
    /// Whole-task retries for transient failures
    pub retries: usize,
}

impl From<&Config> for PoolConfig {
    fn from(config: &Config) -> Self {
        Self {
            worker_count: config.worker_count,
            retries: config.retries,
        }
    }
}

/// What the pool did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSummary {
    /// Tasks taken off the queue by a worker
    pub dispatched: usize,
    /// Tasks fully classified and submitted
    pub completed: usize,
    /// Tasks never dequeued because the run was cancelled
    pub skipped: usize,
    /// Whether cancellation was requested during the run
    pub cancelled: bool,
}

#[derive(Clone)]
struct WorkerContext {
    queue: Arc<Mutex<mpsc::Receiver<UrlTask>>>,
    resolver: Arc<RedirectResolver>,
    collector: Arc<ResultCollector>,
    stats: Arc<ProcessingStats>,
    dispatched: Arc<AtomicUsize>,
    cancel: CancellationToken,
    retries: usize,
}

/// Runs every task through the pool and blocks until all are classified.
///
/// Each classification is submitted to `collector` as soon as it is ready, so
/// submission order follows completion order, not input order.
///
/// # Errors
///
/// Returns `ConfigError::InvalidWorkerCount` if `config.worker_count` is 0.
pub async fn run_pool(
    tasks: Vec<UrlTask>,
    config: &PoolConfig,
    resolver: Arc<RedirectResolver>,
    collector: Arc<ResultCollector>,
    stats: Arc<ProcessingStats>,
    cancel: CancellationToken,
) -> Result<PoolSummary, ConfigError> {
    if config.worker_count == 0 {
        return Err(ConfigError::InvalidWorkerCount(config.worker_count));
    }

    let total = tasks.len();
    let (tx, rx) = mpsc::channel::<UrlTask>(config.worker_count);
    let feeder = tokio::spawn(feed_queue(tasks, tx, cancel.clone()));

    let ctx = WorkerContext {
        queue: Arc::new(Mutex::new(rx)),
        resolver,
        collector,
        stats,
        dispatched: Arc::new(AtomicUsize::new(0)),
        cancel: cancel.clone(),
        retries: config.retries,
    };

    log::debug!(
        "Starting {} workers for {} URLs",
        config.worker_count,
        total
    );

    let mut workers = FuturesUnordered::new();
    for worker_id in 0..config.worker_count {
        workers.push(tokio::spawn(worker_loop(worker_id, ctx.clone())));
    }

    let mut completed = 0usize;
    while let Some(result) = workers.next().await {
        match result {
            Ok(processed) => completed += processed,
            Err(join_error) => log::warn!("Worker panicked: {:?}", join_error),
        }
    }

    if let Err(join_error) = feeder.await {
        log::warn!("Queue feeder panicked: {:?}", join_error);
    }

    let dispatched = ctx.dispatched.load(Ordering::SeqCst);
    Ok(PoolSummary {
        dispatched,
        completed,
        skipped: total.saturating_sub(dispatched),
        cancelled: cancel.is_cancelled(),
    })
}

/// Pushes tasks into the queue in input order, stopping early on cancellation.
/// Dropping the sender closes the queue once it drains.
async fn feed_queue(tasks: Vec<UrlTask>, tx: mpsc::Sender<UrlTask>, cancel: CancellationToken) {
    for task in tasks {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::info!("Cancellation requested, no further URLs will be queued");
                break;
            }
            sent = tx.send(task) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }
}

async fn worker_loop(worker_id: usize, ctx: WorkerContext) -> usize {
    let mut processed = 0usize;
    loop {
        let next = {
            let mut queue = ctx.queue.lock().await;
            tokio::select! {
                biased;
                _ = ctx.cancel.cancelled() => None,
                task = queue.recv() => task,
            }
        };
        let Some(task) = next else {
            break;
        };

        ctx.dispatched.fetch_add(1, Ordering::SeqCst);
        process_task(task, &ctx).await;
        processed += 1;
    }
    log::trace!("Worker {} exiting after {} tasks", worker_id, processed);
    processed
}

/// Resolves, classifies and submits one task.
async fn process_task(task: UrlTask, ctx: &WorkerContext) {
    let started = Instant::now();
    let (outcome, retries) = ctx.resolver.resolve_with_retry(&task.url, ctx.retries).await;
    for _ in 0..retries {
        ctx.stats.increment_retry();
    }

    let classification = classify(&task.url, &outcome);
    let elapsed = started.elapsed().as_secs_f64();
    match &classification {
        Classification::CrossDomain {
            initial_domain,
            final_domain,
            hop_count,
            ..
        } => {
            ctx.stats.increment_cross_domain();
            log::info!(
                "Cross-domain redirect: {} ({} -> {}, {} hops, {:.2}s)",
                task.url,
                initial_domain,
                final_domain,
                hop_count,
                elapsed
            );
        }
        Classification::SameDomain {
            domain, hop_count, ..
        } => {
            ctx.stats.increment_same_domain();
            log::debug!(
                "Same-domain: {} ({}, {} hops, {:.2}s)",
                task.url,
                domain,
                hop_count,
                elapsed
            );
        }
        Classification::Invalid { stage, detail } => {
            ctx.stats.increment_failure(*stage);
            log::warn!("Failed to resolve {} [{}]: {}", task.url, stage, detail);
        }
    }

    ctx.collector.submit(ClassifiedTask::new(task, classification));
}

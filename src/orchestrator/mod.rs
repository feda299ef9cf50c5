//! Partitioning and concurrent execution of workers
//!
//! Entries are split into contiguous partitions, one per worker. Workers
//! share nothing but read-only configuration and hand their results back
//! when joined, so the merged list keeps input order.

use crate::browser::SessionFactory;
use crate::config::Config;
use crate::model::{FailureKind, ScrapingResult};
use crate::notify::Notifier;
use crate::worker::{Worker, WorkerReport};
use crate::ScraperError;
use std::sync::Arc;

/// Aggregate outcome of a run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// One result per input entry that was attempted, in input order
    pub results: Vec<ScrapingResult>,

    /// At least one partition was abandoned
    pub interrupted: bool,

    /// Per-worker reports, in partition order
    pub workers: Vec<WorkerReport>,
}

/// Splits entries into `min(n, len)` contiguous partitions
///
/// Partition sizes differ by at most one, larger partitions first.
///
/// # Examples
///
/// ```
/// use profile_scraper::orchestrator::partition;
///
/// let parts = partition((1..=5).collect::<Vec<_>>(), 2);
/// assert_eq!(parts, vec![vec![1, 2, 3], vec![4, 5]]);
/// ```
pub fn partition<T>(entries: Vec<T>, n: usize) -> Vec<Vec<T>> {
    let count = n.min(entries.len());
    if count == 0 {
        return Vec::new();
    }

    let base = entries.len() / count;
    let extra = entries.len() % count;

    let mut parts = Vec::with_capacity(count);
    let mut rest = entries.into_iter();
    for i in 0..count {
        let size = base + usize::from(i < extra);
        parts.push(rest.by_ref().take(size).collect());
    }
    parts
}

/// Number of partitions used for a run
///
/// Headless runs use the configured worker count. Interactive runs use a
/// single partition so that only one browser window waits for the operator.
pub fn partition_count(config: &Config, headless: bool) -> usize {
    if headless {
        config.scraper.workers as usize
    } else {
        1
    }
}

/// Scrapes all entries and merges the results
///
/// Each partition runs on its own task with its own browser session. A
/// worker task that fails to join is logged and its partition recorded as
/// generic errors.
pub async fn run_scrape(
    config: Arc<Config>,
    entries: Vec<String>,
    headless: bool,
    factory: Arc<dyn SessionFactory>,
    notifier: Arc<dyn Notifier>,
) -> RunReport {
    let partitions = partition(entries, partition_count(&config, headless));
    tracing::info!(
        "Starting {} worker(s) (headless: {})",
        partitions.len(),
        headless
    );

    let mut handles = Vec::with_capacity(partitions.len());
    for (index, entries) in partitions.into_iter().enumerate() {
        let id = index + 1;
        let size = entries.len();
        let worker = Worker::new(id, entries, config.clone(), headless, notifier.clone());
        let factory = factory.clone();

        tracing::debug!("Scraper #{}: assigned {} entries", id, size);
        let handle = tokio::spawn(async move { worker.run(factory.as_ref()).await });
        handles.push((id, size, handle));
    }

    let mut workers = Vec::with_capacity(handles.len());
    for (id, size, handle) in handles {
        let report = match handle.await {
            Ok(report) => report,
            Err(e) => {
                let err = ScraperError::WorkerJoin {
                    worker: id,
                    message: e.to_string(),
                };
                tracing::error!("{}", err);
                WorkerReport {
                    id,
                    results: vec![ScrapingResult::Error(FailureKind::Generic); size],
                    interrupted: false,
                    company_page_loads: 0,
                }
            }
        };
        workers.push(report);
    }

    let interrupted = workers.iter().any(|w| w.interrupted);
    let results = workers
        .iter()
        .flat_map(|w| w.results.iter().cloned())
        .collect();

    RunReport {
        results,
        interrupted,
        workers,
    }
}

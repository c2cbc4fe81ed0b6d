//! Worker pool
//!
//! A fixed number of tokio tasks pull cursors from the shared queue until
//! the termination detector closes it.

use super::aggregate::{ErrorCollector, ResultAggregator};
use super::tracker::TerminationDetector;
use crate::error::Error;
use crate::fetch::PageFetcher;
use crate::types::{Page, PageRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// State shared by every worker of one run
#[derive(Debug)]
pub struct RunState {
    /// In-flight counter and task queue
    pub detector: Arc<TerminationDetector>,
    /// Collected items
    pub results: ResultAggregator,
    /// Collected failures
    pub errors: ErrorCollector,
}

impl RunState {
    /// Create run state around a detector
    pub fn new(detector: Arc<TerminationDetector>) -> Self {
        Self {
            detector,
            results: ResultAggregator::new(),
            errors: ErrorCollector::new(),
        }
    }
}

/// Fixed-size pool of fetch workers
#[derive(Debug, Clone)]
pub struct WorkerPool {
    workers: usize,
    delay: Duration,
}

impl WorkerPool {
    /// Create a pool
    pub fn new(workers: usize, delay: Duration) -> Self {
        Self { workers, delay }
    }

    /// Run workers until the queue is closed and drained, then join them all
    pub async fn run(
        &self,
        fetcher: Arc<dyn PageFetcher>,
        request: Arc<PageRequest>,
        state: Arc<RunState>,
    ) {
        let mut workers = JoinSet::new();
        for id in 0..self.workers {
            workers.spawn(worker_loop(
                id,
                Arc::clone(&fetcher),
                Arc::clone(&request),
                Arc::clone(&state),
                self.delay,
            ));
        }

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(handled) => debug!(handled, "Worker finished"),
                Err(e) => {
                    error!(error = %e, "Worker terminated abnormally");
                    state
                        .errors
                        .record(Error::worker(format!("worker task failed: {e}")));
                }
            }
        }
    }
}

/// Take, fetch, route, sleep, resolve; repeat until the queue closes.
/// Returns the number of tasks this worker handled.
async fn worker_loop(
    id: usize,
    fetcher: Arc<dyn PageFetcher>,
    request: Arc<PageRequest>,
    state: Arc<RunState>,
    delay: Duration,
) -> usize {
    let mut handled = 0;

    while let Some(task) = state.detector.next_task().await {
        handled += 1;
        debug!(worker = id, cursor = %task.cursor(), "Fetching page");

        let continuation = match fetcher.fetch(&request, task.cursor()).await {
            Ok(Page { items, next_cursor }) => {
                let batch = items.len();
                let total = state.results.merge(items);
                info!(
                    worker = id,
                    batch, total, "Retrieved {batch} items in this batch, {total} so far"
                );
                Some(next_cursor).filter(|next| !next.is_end())
            }
            Err(e) => {
                warn!(worker = id, cursor = %task.cursor(), error = %e, "Page fetch failed");
                state.errors.record(Error::page(task.cursor().as_str(), e));
                None
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(next) = continuation {
            // The task is still counted, so the queue cannot be closed here.
            if let Err(e) = task.continue_with(next) {
                error!(worker = id, error = %e, "Continuation rejected");
                state.errors.record(e);
            }
        }

        drop(task);
    }

    handled
}

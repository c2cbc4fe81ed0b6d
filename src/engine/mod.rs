//! Concurrent paginated fetch engine
//!
//! Walks a cursor chain with a bounded pool of workers.
//!
//! # Overview
//!
//! The engine module provides:
//! - `FetchEngine` - Runs `fetch_all` / `fetch_one` against a `PageFetcher`
//! - `FetchConfig` - Worker count and per-fetch delay
//! - `FetchOutcome` - Items plus the first failure, if any
//!
//! A run starts with one in-flight task per seed cursor. Each successful
//! page may submit its next cursor before it resolves; a failed page
//! resolves without a continuation. The queue closes when the last task
//! resolves, the workers drain out and the run returns whatever was
//! collected, even if some pages failed.

mod aggregate;
mod pool;
mod queue;
mod tracker;
mod types;

pub use aggregate::{ErrorCollector, ResultAggregator};
pub use pool::{RunState, WorkerPool};
pub use queue::TaskQueue;
pub use tracker::{Task, TerminationDetector};
pub use types::{FetchConfig, FetchOutcome, FetchStats, DEFAULT_WORKERS};

use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::types::{Cursor, Page, PageRequest};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Fetch engine for walking cursor-paginated collections
#[derive(Clone)]
pub struct FetchEngine {
    /// Single-page fetcher
    fetcher: Arc<dyn PageFetcher>,
    /// Run configuration
    config: FetchConfig,
}

impl FetchEngine {
    /// Create an engine with the default configuration
    pub fn new<F: PageFetcher + 'static>(fetcher: F) -> Self {
        Self::from_arc(Arc::new(fetcher))
    }

    /// Create an engine around a shared fetcher
    pub fn from_arc(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            config: FetchConfig::default(),
        }
    }

    /// Set fetch configuration
    #[must_use]
    pub fn with_config(mut self, config: FetchConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the fetch configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch a single page, without workers
    pub async fn fetch_one(&self, request: &PageRequest, cursor: &Cursor) -> Result<Page> {
        info!(owner = %request.owner_id, cursor = %cursor, "Fetching single page");
        self.fetcher.fetch(request, cursor).await
    }

    /// Fetch every page reachable from `start`
    ///
    /// Returns `Err` only for an invalid configuration. Page failures are
    /// reported through `FetchOutcome::error` next to the items that were
    /// fetched anyway.
    pub async fn fetch_all(&self, request: PageRequest, start: Cursor) -> Result<FetchOutcome> {
        self.fetch_all_from(request, vec![start]).await
    }

    /// Fetch every page reachable from any of `seeds`
    ///
    /// Each seed starts its own chain; a failure in one chain does not stop
    /// the others.
    pub async fn fetch_all_from(
        &self,
        request: PageRequest,
        seeds: Vec<Cursor>,
    ) -> Result<FetchOutcome> {
        self.config.validate()?;
        if seeds.is_empty() {
            return Ok(FetchOutcome::empty(self.config.workers));
        }

        let started = Instant::now();
        info!(
            owner = %request.owner_id,
            seeds = seeds.len(),
            workers = self.config.workers,
            delay_ms = self.config.delay.as_millis() as u64,
            "Starting retrieval"
        );

        let detector = TerminationDetector::new();
        for seed in seeds {
            detector.submit(seed)?;
        }
        let state = Arc::new(RunState::new(detector));

        WorkerPool::new(self.config.workers, self.config.delay)
            .run(
                Arc::clone(&self.fetcher),
                Arc::new(request),
                Arc::clone(&state),
            )
            .await;

        let stats = FetchStats {
            pages_fetched: state.results.pages(),
            pages_failed: state.errors.count(),
            items_retrieved: state.results.retrieved(),
            workers: self.config.workers,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        let outcome = FetchOutcome {
            items: state.results.take_items(),
            error: state.errors.take_first(),
            stats,
        };

        if let Some(e) = &outcome.error {
            warn!(
                failed = outcome.stats.pages_failed,
                error = %e,
                "Retrieval finished with failures, {} items are partial results",
                outcome.items.len()
            );
        } else {
            info!(
                pages = outcome.stats.pages_fetched,
                duration_ms = outcome.stats.duration_ms,
                "Retrieval complete, retrieved {} items",
                outcome.items.len()
            );
        }

        Ok(outcome)
    }
}

impl std::fmt::Debug for FetchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

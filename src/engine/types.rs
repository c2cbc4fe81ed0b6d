//! Engine types
//!
//! Run configuration, statistics and the outcome handed back to callers.

use crate::error::{Error, Result};
use crate::types::Item;
use std::time::Duration;

/// Default number of concurrent workers
pub const DEFAULT_WORKERS: usize = 4;

/// Configuration for a fetch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Number of concurrent workers (at least 1)
    pub workers: usize,
    /// Pause each worker takes after every fetch
    pub delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            delay: Duration::ZERO,
        }
    }
}

impl FetchConfig {
    /// Create a new fetch config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set worker count
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the per-fetch delay
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the per-fetch delay in whole seconds
    #[must_use]
    pub fn with_delay_secs(self, secs: u64) -> Self {
        self.with_delay(Duration::from_secs(secs))
    }

    /// Check the config before starting a run
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::invalid_value("workers", "must be at least 1"));
        }
        Ok(())
    }
}

/// Statistics from a fetch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Pages fetched successfully
    pub pages_fetched: usize,
    /// Pages (or workers) that failed
    pub pages_failed: usize,
    /// Items merged into the result
    pub items_retrieved: usize,
    /// Workers used
    pub workers: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// What a run produced: every item fetched, plus the first failure if any
#[derive(Debug)]
pub struct FetchOutcome {
    /// Items in completion order
    pub items: Vec<Item>,
    /// First recorded failure
    pub error: Option<Error>,
    /// Run statistics
    pub stats: FetchStats,
}

impl FetchOutcome {
    /// An outcome with nothing fetched and nothing failed
    pub fn empty(workers: usize) -> Self {
        Self {
            items: Vec::new(),
            error: None,
            stats: FetchStats {
                workers,
                ..FetchStats::default()
            },
        }
    }

    /// Check if every page succeeded
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Check if some items were fetched but at least one page failed
    pub fn is_partial(&self) -> bool {
        self.error.is_some() && !self.items.is_empty()
    }

    /// Number of items fetched
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if no items were fetched
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Split into items and the first error
    pub fn into_parts(self) -> (Vec<Item>, Option<Error>) {
        (self.items, self.error)
    }

    /// Items if every page succeeded, the first error otherwise
    pub fn into_result(self) -> Result<Vec<Item>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.items),
        }
    }
}

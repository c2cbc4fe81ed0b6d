//! Result aggregation and error collection
//!
//! Both collectors are shared by every worker of a run. Each owns one mutex
//! and is the only place its state is mutated.

use crate::error::Error;
use crate::types::Item;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Aggregate {
    items: Vec<Item>,
    retrieved: usize,
    pages: usize,
}

/// Accumulates item batches from concurrent workers
///
/// Batches land in the order workers finish their fetches, not in
/// pagination order. Items within one batch keep their page order.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    inner: Mutex<Aggregate>,
}

impl ResultAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch, returning the number of items retrieved so far
    pub fn merge(&self, batch: Vec<Item>) -> usize {
        let mut agg = self.lock();
        agg.retrieved += batch.len();
        agg.pages += 1;
        agg.items.extend(batch);
        agg.retrieved
    }

    /// Items retrieved so far
    pub fn retrieved(&self) -> usize {
        self.lock().retrieved
    }

    /// Pages merged so far
    pub fn pages(&self) -> usize {
        self.lock().pages
    }

    /// Take the collected items, leaving the aggregator empty
    pub fn take_items(&self) -> Vec<Item> {
        std::mem::take(&mut self.lock().items)
    }

    // Poisoning is ignored: already-merged batches stay valid.
    fn lock(&self) -> MutexGuard<'_, Aggregate> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Default)]
struct Collected {
    first: Option<Error>,
    count: usize,
}

/// Records page failures without stopping the run
///
/// The first recorded error is the one reported; later ones are counted
/// and dropped.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    inner: Mutex<Collected>,
}

impl ErrorCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. Returns `true` if it became the reported error.
    pub fn record(&self, err: Error) -> bool {
        let mut collected = self.lock();
        collected.count += 1;
        if collected.first.is_none() {
            collected.first = Some(err);
            true
        } else {
            false
        }
    }

    /// Number of errors recorded, including dropped ones
    pub fn count(&self) -> usize {
        self.lock().count
    }

    /// Check if anything has been recorded
    pub fn has_error(&self) -> bool {
        self.lock().first.is_some()
    }

    /// Take the first recorded error
    pub fn take_first(&self) -> Option<Error> {
        self.lock().first.take()
    }

    fn lock(&self) -> MutexGuard<'_, Collected> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

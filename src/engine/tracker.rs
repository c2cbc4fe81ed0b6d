//! Termination detection
//!
//! A run is over when no submitted cursor is left unresolved. The detector
//! counts tasks in flight and closes the queue on the decrement that reaches
//! zero. At that point nothing can submit again: only an in-flight task may
//! spawn a continuation, and there are none left.

use super::queue::TaskQueue;
use crate::error::Result;
use crate::types::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-flight counter paired with the task queue it guards
#[derive(Debug)]
pub struct TerminationDetector {
    in_flight: AtomicUsize,
    queue: TaskQueue,
}

impl TerminationDetector {
    /// Create a detector with an empty, open queue
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            in_flight: AtomicUsize::new(0),
            queue: TaskQueue::new(),
        })
    }

    /// Count a cursor as in flight, then enqueue it
    pub fn submit(&self, cursor: Cursor) -> Result<()> {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        if let Err(e) = self.queue.submit(cursor) {
            self.resolve_one();
            return Err(e);
        }
        Ok(())
    }

    /// Wait for the next task, or `None` once the run has terminated
    pub async fn next_task(self: &Arc<Self>) -> Option<Task> {
        let cursor = self.queue.take().await?;
        Some(Task {
            cursor,
            detector: Arc::clone(self),
        })
    }

    /// Number of submitted tasks not yet resolved
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Check if the queue has been closed
    pub fn is_closed(&self) -> bool {
        self.queue.is_closed()
    }

    fn resolve_one(&self) {
        let previous = self.in_flight.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(previous > 0, "task resolved more often than submitted");
        if previous == 1 {
            self.queue.close();
        }
    }
}

/// One in-flight cursor held by a worker
///
/// Dropping the task resolves it, including when the worker unwinds from a
/// panic, so every submitted cursor is resolved exactly once.
#[derive(Debug)]
pub struct Task {
    cursor: Cursor,
    detector: Arc<TerminationDetector>,
}

impl Task {
    /// The cursor to fetch
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Submit the follow-up cursor while this task still counts as in flight
    pub fn continue_with(&self, next: Cursor) -> Result<()> {
        self.detector.submit(next)
    }
}

impl Drop for Task {
    fn drop(&mut self) {
        self.detector.resolve_one();
    }
}

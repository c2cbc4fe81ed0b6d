//! Task queue
//!
//! Pending cursors waiting for a worker. Backed by an unbounded
//! `async-channel`: every worker holds its own clone of the receiver, so
//! no worker has to lock the queue while it waits.

use crate::error::{Error, Result};
use crate::types::Cursor;
use async_channel::{Receiver, Sender};

/// Concurrency-safe queue of cursors awaiting fetch
#[derive(Debug, Clone)]
pub struct TaskQueue {
    tx: Sender<Cursor>,
    rx: Receiver<Cursor>,
}

impl TaskQueue {
    /// Create an empty, open queue
    pub fn new() -> Self {
        let (tx, rx) = async_channel::unbounded();
        Self { tx, rx }
    }

    /// Enqueue a cursor
    ///
    /// Fails only when the queue has already been closed, which means the
    /// caller broke the submit-before-close protocol.
    pub fn submit(&self, cursor: Cursor) -> Result<()> {
        self.tx.try_send(cursor).map_err(|_| Error::QueueClosed)
    }

    /// Wait for the next cursor
    ///
    /// Returns `None` once the queue is closed and drained.
    pub async fn take(&self) -> Option<Cursor> {
        self.rx.recv().await.ok()
    }

    /// Close the queue. Returns `true` if this call closed it.
    pub fn close(&self) -> bool {
        self.tx.close()
    }

    /// Check if the queue has been closed
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Number of cursors waiting to be taken
    pub fn len(&self) -> usize {
        self.tx.len()
    }

    /// Check if no cursor is waiting
    pub fn is_empty(&self) -> bool {
        self.tx.is_empty()
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

//! Page fetcher seam
//!
//! The engine only knows how to ask for one page at a cursor. How that page
//! travels over the wire is up to the implementation: `HttpPageFetcher` in
//! the `http` module talks to a real API, tests use in-memory stubs.

use crate::error::Result;
use crate::types::{Cursor, Page, PageRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Fetches a single page of a cursor-paginated collection
///
/// Implementations must be safe to call from several workers at once.
/// A returned error fails only the page at `cursor`; the engine records it
/// and keeps going with whatever else is in flight.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `cursor` (the start cursor means the first page)
    async fn fetch(&self, request: &PageRequest, cursor: &Cursor) -> Result<Page>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, request: &PageRequest, cursor: &Cursor) -> Result<Page> {
        (**self).fetch(request, cursor).await
    }
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Box<T> {
    async fn fetch(&self, request: &PageRequest, cursor: &Cursor) -> Result<Page> {
        (**self).fetch(request, cursor).await
    }
}

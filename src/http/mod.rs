//! HTTP module
//!
//! Transport for page fetches against a real API.
//!
//! # Features
//!
//! - **HttpClient**: timeouts, default headers, per-request auth
//! - **HttpPageFetcher**: `PageFetcher` driven by an `EndpointDefinition`
//! - **ProfileLookup**: username to account id, one request
//!
//! Failed requests are not retried. A failed page is final and reported
//! by the engine next to the pages that did succeed.

mod client;
mod fetcher;
mod profile;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use fetcher::{select_path, HttpPageFetcher};
pub use profile::{ProfileLookup, DEFAULT_API_BASE};

#[cfg(test)]
mod tests;

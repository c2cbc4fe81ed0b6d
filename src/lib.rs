//! # cursor-harvest
//!
//! Concurrent retrieval of cursor-paginated collections.
//!
//! Every page of a collection carries the cursor of the page after it. A
//! pool of workers follows that chain: each fetched page is merged into a
//! shared result and its continuation is queued for whichever worker is free
//! next. The run ends once no page is being fetched and none is queued.
//!
//! ## Features
//!
//! - **Worker pool**: Configurable number of concurrent fetchers
//! - **Partial results**: A failed page keeps everything merged so far
//! - **Endpoint definitions**: Built-in and YAML-described endpoints
//! - **Cookie auth**: Browser session cookies forwarded with every request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cursor_harvest::{load_endpoint, Cursor, FetchEngine, HttpPageFetcher, PageRequest};
//!
//! #[tokio::main]
//! async fn main() -> cursor_harvest::Result<()> {
//!     let endpoint = load_endpoint("followers")?;
//!     let engine = FetchEngine::new(HttpPageFetcher::new(endpoint)?);
//!
//!     let outcome = engine
//!         .fetch_all(PageRequest::new("1234", 12), Cursor::start())
//!         .await?;
//!     println!("{} items, complete: {}", outcome.len(), outcome.is_complete());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          FetchEngine                            │
//! │  fetch_one(request, cursor) → Page                              │
//! │  fetch_all(request, cursor) → FetchOutcome { items, error }     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────┬──────────────┬──────────┐
//! │  TaskQueue   │ TerminationDetector   │  Aggregate   │  Fetch   │
//! ├──────────────┼───────────────────────┼──────────────┼──────────┤
//! │ Cursors      │ In-flight count       │ Items        │ HTTP     │
//! │ Close        │ Close at zero         │ First error  │ Cookies  │
//! └──────────────┴───────────────────────┴──────────────┴──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Cursors, pages and requests
pub mod types;

/// Cookie parsing and request credentials
pub mod auth;

/// The page fetcher seam
pub mod fetch;

/// Worker pool, task queue and termination detection
pub mod engine;

/// HTTP client and endpoint-driven page fetcher
pub mod http;

/// Endpoint definitions
pub mod config;

/// YAML loader for endpoint definitions
pub mod loader;

/// Built-in endpoint definitions
pub mod endpoints;

/// Result rendering and writing
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::EndpointDefinition;
pub use engine::{FetchConfig, FetchEngine, FetchOutcome, FetchStats};
pub use fetch::PageFetcher;
pub use http::HttpPageFetcher;
pub use loader::load_endpoint;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

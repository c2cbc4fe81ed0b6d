//! Output module
//!
//! Serializes fetched items and writes them to a file or stdout.

mod writer;

pub use writer::{render, write_output, OutputFormat};

//! YAML Loader module
//!
//! Load endpoint definitions by built-in name or from YAML files.

mod parser;

pub use parser::{load_endpoint, load_endpoint_from_str};

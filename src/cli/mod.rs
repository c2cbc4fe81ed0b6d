//! CLI module
//!
//! Command-line interface for fetching paginated collections.
//!
//! # Commands
//!
//! - `followers` - Accounts following a user
//! - `following` - Accounts a user follows
//! - `user` - Profile of an account, to find its id
//! - `endpoint` - Any collection described by a YAML endpoint definition
//! - `list` - Built-in endpoints

mod commands;
mod runner;

pub use commands::{Cli, Commands, ListArgs};
pub use runner::Runner;

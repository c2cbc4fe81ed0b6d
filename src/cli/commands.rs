//! CLI commands and argument parsing

use crate::engine::DEFAULT_WORKERS;
use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fetch every page of a cursor-paginated collection
#[derive(Parser, Debug)]
#[command(name = "cursor-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Session cookies ("name=value; name2=value2")
    #[arg(long, global = true)]
    pub cookies: Option<String>,

    /// Output file (results are printed to stdout when omitted)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Number of concurrent workers used with --all
    #[arg(long, global = true, default_value_t = DEFAULT_WORKERS)]
    pub threads: usize,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Enable progress logs on stderr
    #[arg(short, long, global = true, alias = "logs")]
    pub verbose: bool,

    /// Override the API base URL of the endpoint
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Retrieve the accounts following a user
    Followers(ListArgs),

    /// Retrieve the accounts a user follows
    Following(ListArgs),

    /// Retrieve the profile of an account, including its id
    User {
        /// Account username
        username: String,
    },

    /// Retrieve a collection described by an endpoint definition
    Endpoint {
        /// Endpoint definition (built-in name or YAML file)
        #[arg(short, long)]
        definition: PathBuf,

        #[command(flatten)]
        args: ListArgs,
    },

    /// List built-in endpoints
    List,
}

/// Arguments shared by every collection command
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Id of the account that owns the collection
    pub owner_id: String,

    /// Items per request (endpoint default when omitted)
    pub count: Option<u32>,

    /// Cursor to start from (first page when omitted)
    pub cursor: Option<String>,

    /// Follow the cursor chain and retrieve every page
    #[arg(short, long)]
    pub all: bool,

    /// Seconds each worker waits after a request when using --all
    #[arg(long)]
    pub sleep: Option<u64>,
}

//! CLI runner - executes commands

use crate::auth::AuthContext;
use crate::cli::commands::{Cli, Commands, ListArgs};
use crate::config::EndpointDefinition;
use crate::endpoints::list_builtin;
use crate::engine::{FetchConfig, FetchEngine};
use crate::error::{Error, Result};
use crate::http::{HttpPageFetcher, ProfileLookup};
use crate::loader::load_endpoint;
use crate::output::write_output;
use crate::types::{Cursor, PageRequest};
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use tracing::{error, info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Followers(args) => self.fetch(Path::new("followers"), args).await,
            Commands::Following(args) => self.fetch(Path::new("following"), args).await,
            Commands::User { username } => self.user(username).await,
            Commands::Endpoint { definition, args } => self.fetch(definition, args).await,
            Commands::List => self.list(),
        }
    }

    /// Credentials from `--cookies`
    pub fn auth(&self) -> AuthContext {
        self.cli
            .cookies
            .as_deref()
            .map(AuthContext::from_cookie_string)
            .unwrap_or_default()
    }

    /// Request parameters for a run, falling back to endpoint defaults
    pub fn page_request(&self, endpoint: &EndpointDefinition, args: &ListArgs) -> PageRequest {
        let page_size = args.count.unwrap_or(endpoint.defaults.page_size);
        PageRequest::new(args.owner_id.clone(), page_size).with_auth(self.auth())
    }

    /// Engine configuration for a run, falling back to endpoint defaults
    pub fn fetch_config(&self, endpoint: &EndpointDefinition, args: &ListArgs) -> FetchConfig {
        let delay_secs = args.sleep.unwrap_or(endpoint.defaults.delay_secs);
        FetchConfig::new()
            .with_workers(self.cli.threads)
            .with_delay_secs(delay_secs)
    }

    async fn fetch(&self, endpoint: &Path, args: &ListArgs) -> Result<()> {
        let mut definition = load_endpoint(endpoint)?;
        if let Some(base_url) = &self.cli.base_url {
            definition.base_url.clone_from(base_url);
        }
        let request = self.page_request(&definition, args);
        let config = self.fetch_config(&definition, args);
        let start = Cursor::from(args.cursor.clone());

        let fetcher = HttpPageFetcher::new(definition.clone())?;

        if !args.all {
            info!(
                "Fetching {} for {} with count {} and cursor '{}'",
                definition.name, request.owner_id, request.page_size, start
            );
            // A single page is written as the API sent it.
            let body = fetcher.fetch_raw(&request, &start).await?;
            match fetcher.parse_page(&body) {
                Ok(page) => info!(items = page.len(), next = %page.next_cursor, "Fetched page"),
                Err(e) => warn!(error = %e, "Response is not a {} page", definition.name),
            }
            return self.write(&body);
        }

        let engine = FetchEngine::new(fetcher).with_config(config);

        info!(
            "Fetching ALL {} for {} with count {} from cursor '{}'",
            definition.name, request.owner_id, request.page_size, start
        );
        let outcome = engine.fetch_all(request, start).await?;

        // Partial results are written before the failure is reported.
        self.write(&outcome.items)?;

        match outcome.error {
            Some(e) => {
                error!("Error fetching all {}: {e}. Only partial results available", definition.name);
                Err(Error::Incomplete {
                    failed_pages: outcome.stats.pages_failed,
                    items: outcome.items.len(),
                })
            }
            None => {
                info!("{} retrieval completed successfully", definition.name);
                Ok(())
            }
        }
    }

    async fn user(&self, username: &str) -> Result<()> {
        let lookup = match &self.cli.base_url {
            Some(base_url) => ProfileLookup::with_base_url(base_url.as_str())?,
            None => ProfileLookup::new()?,
        };

        info!("Fetching user for {username}");
        let profile = lookup.fetch(username, self.auth()).await?;
        match ProfileLookup::user_id(&profile) {
            Some(id) => info!(user_id = id, "User retrieval completed successfully"),
            None => warn!("Profile response for {username} has no user id"),
        }

        self.write(&profile)
    }

    fn list(&self) -> Result<()> {
        let endpoints = list_builtin()
            .into_iter()
            .map(|name| {
                let definition = load_endpoint(name)?;
                Ok(json!({
                    "name": definition.name,
                    "description": definition.description,
                    "url": format!("{}{}", definition.base_url, definition.path),
                    "default_delay_secs": definition.defaults.delay_secs,
                }))
            })
            .collect::<Result<Vec<_>>>()?;

        self.write(&endpoints)
    }

    fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        write_output(value, self.cli.format, self.cli.output.as_deref())
    }
}

//! HTTP page fetcher
//!
//! Fetches one page of an endpoint described by an `EndpointDefinition`.

use super::client::{HttpClient, RequestConfig};
use crate::config::EndpointDefinition;
use crate::error::{Error, Result};
use crate::fetch::PageFetcher;
use crate::types::{Cursor, Item, JsonValue, Page, PageRequest};
use async_trait::async_trait;
use tracing::debug;

/// `PageFetcher` for a JSON endpoint with cursor pagination
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: HttpClient,
    endpoint: EndpointDefinition,
}

impl HttpPageFetcher {
    /// Create a fetcher with a default HTTP client
    pub fn new(endpoint: EndpointDefinition) -> Result<Self> {
        Ok(Self::with_client(HttpClient::new()?, endpoint))
    }

    /// Create a fetcher with a custom HTTP client
    pub fn with_client(client: HttpClient, endpoint: EndpointDefinition) -> Self {
        Self { client, endpoint }
    }

    /// The endpoint this fetcher talks to
    pub fn endpoint(&self) -> &EndpointDefinition {
        &self.endpoint
    }

    /// Build the request for one page
    ///
    /// The cursor parameter is left out for the start cursor.
    pub fn request_config(&self, request: &PageRequest, cursor: &Cursor) -> RequestConfig {
        let pagination = &self.endpoint.pagination;

        let mut config = RequestConfig::new()
            .query(&pagination.page_size_param, request.page_size.to_string())
            .auth(request.auth.clone());
        if !cursor.is_start() {
            config = config.query(&pagination.cursor_param, cursor.as_str());
        }
        for (key, value) in &self.endpoint.headers {
            config = config.header(key, value);
        }
        config
    }

    /// Fetch one page and return the response body as sent by the API
    pub async fn fetch_raw(&self, request: &PageRequest, cursor: &Cursor) -> Result<JsonValue> {
        let url = self.endpoint.url_for(&request.owner_id)?;
        let config = self.request_config(request, cursor);

        self.client
            .get_json_with_config(url.as_str(), config)
            .await
    }

    /// Extract items and the next cursor from a response body
    ///
    /// A missing or `null` cursor field marks the last page. Array entries
    /// that are not objects are skipped.
    pub fn parse_page(&self, body: &JsonValue) -> Result<Page> {
        let items_path = &self.endpoint.items_path;
        let items: Vec<Item> = select_path(body, items_path)
            .ok_or_else(|| Error::malformed(format!("missing '{items_path}' in response")))?
            .as_array()
            .ok_or_else(|| Error::malformed(format!("'{items_path}' is not an array")))?
            .iter()
            .filter_map(|item| item.as_object().cloned())
            .collect();

        let cursor_path = &self.endpoint.pagination.cursor_path;
        let next_cursor = match select_path(body, cursor_path) {
            None | Some(JsonValue::Null) => Cursor::start(),
            Some(JsonValue::String(token)) => Cursor::new(token.as_str()),
            Some(JsonValue::Number(n)) => Cursor::new(n.to_string()),
            Some(other) => {
                return Err(Error::malformed(format!(
                    "'{cursor_path}' must be a string or number, got {other}"
                )));
            }
        };

        Ok(Page { items, next_cursor })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, request: &PageRequest, cursor: &Cursor) -> Result<Page> {
        let body = self.fetch_raw(request, cursor).await?;
        let page = self.parse_page(&body)?;

        debug!(
            endpoint = %self.endpoint.name,
            cursor = %cursor,
            items = page.len(),
            next = %page.next_cursor,
            "Fetched page"
        );
        Ok(page)
    }
}

/// Walk a dotted path (`data.users`, optionally prefixed with `$.`) through
/// nested objects
pub fn select_path<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        match current {
            JsonValue::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

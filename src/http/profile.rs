//! Profile lookup
//!
//! Resolves a username to its profile record. The record carries the
//! numeric account id that the collection endpoints take as their owner.

use super::client::{HttpClient, HttpClientConfig, RequestConfig};
use super::fetcher::select_path;
use crate::auth::AuthContext;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use tracing::debug;

/// API root used by the built-in endpoints
pub const DEFAULT_API_BASE: &str = "https://www.instagram.com/api/v1";

const PROFILE_PATH: &str = "/users/web_profile_info/";
const APP_ID_HEADER: &str = "X-IG-App-ID";
const APP_ID: &str = "936619743392459";

/// Single-request profile lookup by username
#[derive(Debug, Clone)]
pub struct ProfileLookup {
    client: HttpClient,
}

impl ProfileLookup {
    /// Create a lookup against the public API
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Create a lookup against another API root
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let config = HttpClientConfig::builder()
            .base_url(base_url)
            .header(APP_ID_HEADER, APP_ID)
            .build();
        Ok(Self {
            client: HttpClient::with_config(config)?,
        })
    }

    /// Fetch the profile of `username`, returning the response body unchanged
    pub async fn fetch(&self, username: &str, auth: AuthContext) -> Result<JsonValue> {
        let username = username.trim().trim_start_matches('@');
        if username.is_empty() {
            return Err(Error::invalid_value("username", "must not be empty"));
        }
        if username.contains(['/', '?', '#', '&']) {
            return Err(Error::invalid_value(
                "username",
                format!("'{username}' contains reserved characters"),
            ));
        }

        let config = RequestConfig::new().query("username", username).auth(auth);
        let profile: JsonValue = self.client.get_json_with_config(PROFILE_PATH, config).await?;

        debug!(username, user_id = ?Self::user_id(&profile), "Fetched profile");
        Ok(profile)
    }

    /// The account id inside a profile response
    pub fn user_id(profile: &JsonValue) -> Option<&str> {
        select_path(profile, "data.user.id").and_then(JsonValue::as_str)
    }
}

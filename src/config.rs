//! Endpoint definitions
//!
//! An endpoint definition describes one cursor-paginated collection:
//! where it lives, where the items and the next cursor sit in the response,
//! and which query parameters carry the cursor and the page size.
//! Definitions are written in YAML; see `endpoints/` for the built-ins.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Placeholder in `path` replaced by the owner id
pub const OWNER_PLACEHOLDER: &str = "{owner}";

// ============================================================================
// Top-Level Endpoint Definition
// ============================================================================

/// A paginated collection endpoint loaded from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDefinition {
    /// Short name (e.g. "followers")
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Base URL for API requests
    pub base_url: String,

    /// Path template, must contain `{owner}`
    pub path: String,

    /// Dotted path to the items array in the response
    pub items_path: String,

    /// Cursor pagination settings
    pub pagination: CursorPaginationDef,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Defaults used when the caller does not say otherwise
    #[serde(default)]
    pub defaults: EndpointDefaults,
}

/// Where the cursor travels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPaginationDef {
    /// Query parameter carrying the cursor (omitted on the first page)
    pub cursor_param: String,

    /// Dotted path to the next cursor in the response
    pub cursor_path: String,

    /// Query parameter carrying the page size
    pub page_size_param: String,
}

/// Per-endpoint defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDefaults {
    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Seconds each worker waits after a fetch
    #[serde(default)]
    pub delay_secs: u64,
}

fn default_page_size() -> u32 {
    12
}

impl Default for EndpointDefaults {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            delay_secs: 0,
        }
    }
}

impl EndpointDefinition {
    /// Check that the definition can be used to build requests
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_value("name", "must not be empty"));
        }
        Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        if !self.path.contains(OWNER_PLACEHOLDER) {
            return Err(Error::invalid_value(
                "path",
                format!("must contain the {OWNER_PLACEHOLDER} placeholder"),
            ));
        }

        let required = [
            ("items_path", &self.items_path),
            ("pagination.cursor_param", &self.pagination.cursor_param),
            ("pagination.cursor_path", &self.pagination.cursor_path),
            ("pagination.page_size_param", &self.pagination.page_size_param),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::invalid_value(field, "must not be empty"));
            }
        }

        Ok(())
    }

    /// Build the collection URL for an owner
    pub fn url_for(&self, owner_id: &str) -> Result<Url> {
        if owner_id.is_empty() || owner_id.contains(['/', '?', '#']) {
            return Err(Error::invalid_value(
                "owner_id",
                format!("'{owner_id}' is not a valid path segment"),
            ));
        }

        let path = self.path.replace(OWNER_PLACEHOLDER, owner_id);
        let full = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&full)?)
    }
}

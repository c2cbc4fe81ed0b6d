//! Common types used throughout cursor-harvest
//!
//! This module contains the pagination data model shared by the engine,
//! the fetchers and the output layer.

use crate::auth::AuthContext;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One fetched entity. The engine never looks inside it.
pub type Item = JsonObject;

// ============================================================================
// Cursor
// ============================================================================

/// Opaque pagination position token
///
/// The empty cursor means "start from the beginning" when submitted and
/// "no further pages" when returned as a next cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Create a cursor from a token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The start-of-collection cursor
    pub fn start() -> Self {
        Self::default()
    }

    /// Check if this is the start cursor
    pub fn is_start(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if this cursor marks the end of the chain
    pub fn is_end(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the cursor, returning the raw token
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Cursor {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Cursor {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<Option<String>> for Cursor {
    fn from(token: Option<String>) -> Self {
        token.map(Self).unwrap_or_default()
    }
}

// ============================================================================
// Page
// ============================================================================

/// Result of one successful fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Items in the order the API returned them
    pub items: Vec<Item>,
    /// Cursor of the following page, empty when exhausted
    pub next_cursor: Cursor,
}

impl Page {
    /// Create a page
    pub fn new(items: Vec<Item>, next_cursor: impl Into<Cursor>) -> Self {
        Self {
            items,
            next_cursor: next_cursor.into(),
        }
    }

    /// Create the final page of a chain
    pub fn last(items: Vec<Item>) -> Self {
        Self::new(items, Cursor::start())
    }

    /// Check if another page follows this one
    pub fn has_more(&self) -> bool {
        !self.next_cursor.is_end()
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Page Request
// ============================================================================

/// Parameters fixed for a whole run and forwarded unchanged to every fetch
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Owner of the collection (user id, account id, ...)
    pub owner_id: String,
    /// Credentials handed to the fetcher
    pub auth: AuthContext,
    /// Items requested per page
    pub page_size: u32,
}

impl PageRequest {
    /// Create a request without credentials
    pub fn new(owner_id: impl Into<String>, page_size: u32) -> Self {
        Self {
            owner_id: owner_id.into(),
            auth: AuthContext::None,
            page_size,
        }
    }

    /// Attach credentials
    #[must_use]
    pub fn with_auth(mut self, auth: AuthContext) -> Self {
        self.auth = auth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cursor_start_and_end() {
        let start = Cursor::start();
        assert!(start.is_start());
        assert!(start.is_end());
        assert_eq!(start.as_str(), "");

        let cursor = Cursor::new("QVFE");
        assert!(!cursor.is_start());
        assert_eq!(cursor.to_string(), "QVFE");
    }

    #[test]
    fn test_cursor_from_option() {
        assert!(Cursor::from(None::<String>).is_end());
        assert_eq!(Cursor::from(Some("abc".to_string())).as_str(), "abc");
    }

    #[test]
    fn test_cursor_serializes_as_string() {
        let value = serde_json::to_value(Cursor::new("p2")).unwrap();
        assert_eq!(value, json!("p2"));
    }

    #[test]
    fn test_page_has_more() {
        let item = json!({"id": 1}).as_object().unwrap().clone();
        let page = Page::new(vec![item], "p2");
        assert!(page.has_more());
        assert_eq!(page.len(), 1);

        let last = Page::last(Vec::new());
        assert!(!last.has_more());
        assert!(last.is_empty());
    }

    #[test]
    fn test_page_request_builder() {
        let request = PageRequest::new("12345", 50)
            .with_auth(AuthContext::Bearer {
                token: "t".to_string(),
            });
        assert_eq!(request.owner_id, "12345");
        assert_eq!(request.page_size, 50);
        assert!(matches!(request.auth, AuthContext::Bearer { .. }));
    }
}

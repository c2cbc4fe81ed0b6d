//! Auth context types
//!
//! The runtime credentials attached to every page request.

use super::cookies::{format_cookie_header, parse_cookies};
use reqwest::RequestBuilder;
use std::collections::BTreeMap;

/// Credentials forwarded to the page fetcher
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthContext {
    /// No authentication required
    #[default]
    None,

    /// Browser session cookies, sent as a single `Cookie` header
    Cookies(BTreeMap<String, String>),

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// Custom headers
    CustomHeaders(BTreeMap<String, String>),
}

impl AuthContext {
    /// Build a cookie context from a `name=value; name2=value2` string
    ///
    /// An empty string yields `AuthContext::None`.
    pub fn from_cookie_string(raw: &str) -> Self {
        let cookies = parse_cookies(raw);
        if cookies.is_empty() {
            Self::None
        } else {
            Self::Cookies(cookies)
        }
    }

    /// Check if any credentials are present
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Apply the credentials to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            Self::None => req,
            Self::Cookies(cookies) => req.header(
                reqwest::header::COOKIE,
                format_cookie_header(cookies),
            ),
            Self::Bearer { token } => req.bearer_auth(token),
            Self::CustomHeaders(headers) => {
                let mut req = req;
                for (key, value) in headers {
                    req = req.header(key.as_str(), value.as_str());
                }
                req
            }
        }
    }
}

// Credentials must never end up in logs.
impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Cookies(cookies) => f
                .debug_tuple("Cookies")
                .field(&cookies.keys().collect::<Vec<_>>())
                .finish(),
            Self::Bearer { .. } => f.write_str("Bearer(***)"),
            Self::CustomHeaders(headers) => f
                .debug_tuple("CustomHeaders")
                .field(&headers.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}

//! Authentication module
//!
//! Supports: session cookies, bearer tokens, custom headers
//!
//! The `AuthContext` is opaque to the fetch engine. It is supplied once per
//! run and handed to the page fetcher on every call.

mod cookies;
mod types;

pub use cookies::{format_cookie_header, parse_cookies};
pub use types::AuthContext;

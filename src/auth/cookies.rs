//! Cookie string parsing

use std::collections::BTreeMap;

/// Parse a `name=value; name2=value2` cookie string into a map
///
/// Pairs are split on the first `=`, so values may contain `=`.
/// Fragments without `=` or with an empty name are ignored.
pub fn parse_cookies(raw: &str) -> BTreeMap<String, String> {
    raw.split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Render a cookie map as a `Cookie` header value
pub fn format_cookie_header(cookies: &BTreeMap<String, String>) -> String {
    cookies
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

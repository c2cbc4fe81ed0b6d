//! Built-in endpoint definitions embedded in the binary
//!
//! Lets users run `cursor-harvest followers ...` without a definition file.

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Built-in endpoint YAML definitions
pub static BUILTIN_ENDPOINTS: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut m = BTreeMap::new();
        m.insert("followers", include_str!("../endpoints/followers.yaml"));
        m.insert("following", include_str!("../endpoints/following.yaml"));
        m
    });

/// Get a built-in endpoint by name
pub fn get_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_ENDPOINTS.get(name).copied()
}

/// Check if a name refers to a built-in endpoint
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_ENDPOINTS.contains_key(name)
}

/// List all built-in endpoint names
pub fn list_builtin() -> Vec<&'static str> {
    BUILTIN_ENDPOINTS.keys().copied().collect()
}

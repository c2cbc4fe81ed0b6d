//! YAML parser for endpoint definitions
//!
//! Supports both built-in endpoints (by name) and custom YAML files (by path).

use crate::config::EndpointDefinition;
use crate::endpoints;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Load an endpoint definition from a built-in name or a file path
///
/// # Examples
///
/// ```ignore
/// // Built-in endpoint by name
/// let followers = load_endpoint("followers")?;
///
/// // Custom endpoint from file
/// let custom = load_endpoint("./likes.yaml")?;
/// ```
pub fn load_endpoint(path: impl AsRef<Path>) -> Result<EndpointDefinition> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.contains('/')
        && !path_str.contains('\\')
        && !path_str.ends_with(".yaml")
        && !path_str.ends_with(".yml")
    {
        if let Some(yaml) = endpoints::get_builtin(&path_str) {
            return load_endpoint_from_str(yaml);
        }
    }

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            let builtin_list = endpoints::list_builtin().join(", ");
            Error::config(format!(
                "Endpoint '{}' not found. Built-in endpoints: {}. Or provide a path to a YAML file.",
                path.display(),
                builtin_list
            ))
        } else {
            Error::config(format!(
                "Failed to read endpoint file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_endpoint_from_str(&content)
}

/// Parse and validate an endpoint definition from YAML text
pub fn load_endpoint_from_str(yaml: &str) -> Result<EndpointDefinition> {
    let definition: EndpointDefinition = serde_yaml::from_str(yaml)?;
    definition.validate()?;
    Ok(definition)
}

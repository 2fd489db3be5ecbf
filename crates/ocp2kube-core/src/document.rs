//! Loading typed resources from JSON or YAML documents
//!
//! Every loader checks the document's `kind` against the requested type
//! before decoding it, so a Service handed in where a Route is expected
//! fails loudly instead of decoding into an empty Route.

use k8s_openapi::Resource;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{CoreError, Result};

/// Parse a resource from a JSON document
pub fn from_json<T>(content: &str) -> Result<T>
where
    T: Resource + DeserializeOwned,
{
    let value: serde_json::Value = serde_json::from_str(content)?;
    decode(value)
}

/// Parse a resource from a YAML document
pub fn from_yaml<T>(content: &str) -> Result<T>
where
    T: Resource + DeserializeOwned,
{
    let value: serde_json::Value = serde_yaml::from_str(content)?;
    decode(value)
}

/// Read a resource from disk, picking the decoder from the file extension
pub fn from_path<T>(path: &Path) -> Result<T>
where
    T: Resource + DeserializeOwned,
{
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => from_json(&content),
        Some("yaml") | Some("yml") => from_yaml(&content),
        _ => Err(CoreError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Serialize a resource as a YAML document
pub fn to_yaml<T: Serialize>(resource: &T) -> Result<String> {
    Ok(serde_yaml::to_string(resource)?)
}

fn decode<T>(value: serde_json::Value) -> Result<T>
where
    T: Resource + DeserializeOwned,
{
    // A missing kind is tolerated; hand-written fixtures often omit it
    if let Some(found) = value.get("kind").and_then(|k| k.as_str())
        && found != T::KIND
    {
        return Err(CoreError::KindMismatch {
            expected: T::KIND.to_string(),
            found: found.to_string(),
        });
    }

    Ok(serde_json::from_value(value)?)
}

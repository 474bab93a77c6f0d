//! Nested-key-path JSON decoding.
//!
//! # Design
//! The backend wraps list payloads in a named key (`{"folderList": […]}`)
//! and error payloads in `{"message": …}`. Instead of one wrapper DTO per
//! response shape, the decoder parses the body into a generic
//! `serde_json::Value`, walks a dotted key path, and decodes the located
//! fragment into the target type. An empty list at the resolved path is a
//! valid empty collection; an absent segment is an explicit error, never a
//! silent empty result.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::NetworkError;

/// Reasons a body failed to decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body was not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A key-path segment did not resolve.
    #[error("nested value not found at key path \"{0}\"")]
    KeyPathNotFound(String),
}

impl From<DecodeError> for NetworkError {
    fn from(_: DecodeError) -> Self {
        NetworkError::DecodingFailed
    }
}

/// Decode the value at `key_path` inside `body` into `T`.
///
/// Segments are separated by `.`. Object segments are looked up by key;
/// a segment that parses as an index steps into an array. Any
/// unresolvable segment fails with [`DecodeError::KeyPathNotFound`]
/// carrying the full requested path.
pub fn decode_at_key_path<T: DeserializeOwned>(
    body: &str,
    key_path: &str,
) -> Result<T, DecodeError> {
    let root: serde_json::Value = serde_json::from_str(body)?;
    let mut current = &root;
    for segment in key_path.split('.') {
        current = lookup(current, segment)
            .ok_or_else(|| DecodeError::KeyPathNotFound(key_path.to_string()))?;
    }
    Ok(serde_json::from_value(current.clone())?)
}

/// Best-effort extraction of the server's `message` body on a 400.
/// Falls back to the empty string, matching what gets shown to users
/// when the server sent no reason.
pub(crate) fn error_message(body: &str) -> String {
    decode_at_key_path(body, "message").unwrap_or_default()
}

fn lookup<'a>(value: &'a serde_json::Value, segment: &str) -> Option<&'a serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map.get(segment),
        serde_json::Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

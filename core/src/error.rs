//! Error types for the linkbox API client.
//!
//! # Design
//! `InvalidResponse` and `InvalidRequest` carry a user-facing message
//! because 400 responses come with a structured `{"message": …}` body that
//! callers surface directly. `Display` passes those messages through
//! unchanged. `DecodingFailed` covers both unparsable bodies and absent
//! key paths; the finer-grained cause lives in [`crate::json::DecodeError`].

use thiserror::Error;

/// Errors produced while building, executing, or decoding an API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The relative path could not be combined with the base URL.
    /// Programmer error — should not occur with valid configuration.
    #[error("invalid request URL")]
    InvalidUrl,

    /// The server answered with a non-whitelisted status, the connection
    /// failed, or a 400 carried a decodable server message.
    #[error("{0}")]
    InvalidResponse(String),

    /// The request payload could not be serialized to JSON.
    #[error("{0}")]
    InvalidRequest(String),

    /// The response body did not parse as JSON or the expected key path
    /// was absent.
    #[error("response decoding failed")]
    DecodingFailed,
}

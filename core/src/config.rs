//! Client configuration.
//!
//! The backend host has changed between builds, so the base URL is
//! configuration rather than a contract. `Default` points at the current
//! deployment; `from_env` lets a consumer or test override it without
//! code changes.

use url::Url;

use crate::error::NetworkError;

/// Base URL used when no override is provided.
pub const DEFAULT_BASE_URL: &str = "http://43.202.122.225:8080/api/v1/";

/// Environment variable consulted by [`ApiConfig::from_env`].
pub const BASE_URL_ENV: &str = "LINKBOX_BASE_URL";

/// Validated API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    /// Parse and normalize a base URL. A trailing slash is enforced so
    /// relative endpoint paths resolve under the API prefix rather than
    /// replacing its last segment.
    pub fn new(base_url: &str) -> Result<Self, NetworkError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|_| NetworkError::InvalidUrl)?;
        Ok(Self { base_url })
    }

    /// Read the base URL from `LINKBOX_BASE_URL`, falling back to the
    /// default deployment.
    pub fn from_env() -> Result<Self, NetworkError> {
        match std::env::var(BASE_URL_ENV) {
            Ok(value) => Self::new(&value),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        // The constant is a valid URL; parsing it cannot fail.
        Self { base_url: Url::parse(DEFAULT_BASE_URL).unwrap() }
    }
}

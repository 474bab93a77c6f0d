//! Request execution.
//!
//! # Design
//! The `Transport` trait is the only seam that touches the network, so
//! resource clients stay deterministic under test. The backend's answer
//! contract is narrow: 200 (success with body), 204 (success without
//! body), and 400 (structured client error with a `message` body) count
//! as answered; everything else is an opaque transport failure. Retry is
//! the caller's responsibility.

use crate::error::NetworkError;
use crate::request::HttpRequest;

/// Statuses the server "answers" with; anything else is a failure.
/// 400 stays in because its body carries a user-facing message.
pub const ANSWERED_STATUSES: [u16; 3] = [200, 204, 400];

/// An executed response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Executes built requests. Blocking; concurrency is the caller's
/// concern.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError>;
}

/// Default transport backed by a ureq agent.
#[derive(Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Non-answered statuses are classified here, not surfaced as
        // transport-level errors by the agent.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError> {
        use crate::endpoint::HttpMethod;

        tracing::debug!(method = request.method.as_str(), url = %request.url, "dispatching request");

        let url = request.url.as_str();
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => apply_headers(self.agent.get(url), &request.headers).call(),
            (HttpMethod::Delete, _) => {
                apply_headers(self.agent.delete(url), &request.headers).call()
            }
            (HttpMethod::Post, Some(body)) => {
                apply_headers(self.agent.post(url), &request.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                apply_headers(self.agent.post(url), &request.headers).send_empty()
            }
            (HttpMethod::Put, Some(body)) => {
                apply_headers(self.agent.put(url), &request.headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => {
                apply_headers(self.agent.put(url), &request.headers).send_empty()
            }
        };
        let mut response = result.map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;

        let status = response.status().as_u16();
        if !ANSWERED_STATUSES.contains(&status) {
            tracing::debug!(status, "non-answered status");
            return Err(NetworkError::InvalidResponse(format!(
                "unexpected status code {status}"
            )));
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;

        tracing::debug!(status, "response received");
        Ok(HttpResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answered_statuses_cover_the_wire_contract() {
        assert!(ANSWERED_STATUSES.contains(&200));
        assert!(ANSWERED_STATUSES.contains(&204));
        assert!(ANSWERED_STATUSES.contains(&400));
        assert!(!ANSWERED_STATUSES.contains(&404));
        assert!(!ANSWERED_STATUSES.contains(&500));
    }
}

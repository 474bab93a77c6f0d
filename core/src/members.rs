//! Member registration, feedback, and logout.
//!
//! Registration is the only operation with client-side retry: a fixed,
//! small attempt count with no backoff. On success the device identifier
//! is persisted into the session, which notifies its listeners; failures
//! leave the session untouched.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::endpoint::MemberEndpoint;
use crate::error::NetworkError;
use crate::json;
use crate::request::RequestBuilder;
use crate::session::MemberSession;
use crate::transport::Transport;

/// Total send attempts for registration.
pub const REGISTER_ATTEMPTS: u32 = 3;

/// Typed client for the `members` resource.
pub struct MemberClient {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
    session: MemberSession,
}

impl MemberClient {
    pub fn new(config: &ApiConfig, transport: Arc<dyn Transport>, session: MemberSession) -> Self {
        Self { builder: RequestBuilder::new(config), transport, session }
    }

    /// Register `device_id` with the backend, retrying up to
    /// [`REGISTER_ATTEMPTS`] times. The identifier is stored in the
    /// session only after the server accepts it.
    pub fn register(&self, device_id: &str) -> Result<(), NetworkError> {
        let mut last_error = NetworkError::InvalidResponse(String::new());
        for attempt in 1..=REGISTER_ATTEMPTS {
            match self.try_register(device_id) {
                Ok(()) => {
                    self.session.set_identifier(device_id);
                    return Ok(());
                }
                Err(error) => {
                    tracing::warn!(attempt, %error, "registration attempt failed");
                    last_error = error;
                }
            }
        }
        Err(last_error)
    }

    fn try_register(&self, device_id: &str) -> Result<(), NetworkError> {
        let endpoint = MemberEndpoint::Register { device_id: device_id.to_string() };
        let request = self.builder.build(&endpoint, &self.session)?;
        let response = self.transport.send(&request)?;
        if response.status == 200 {
            Ok(())
        } else {
            Err(NetworkError::InvalidResponse(json::error_message(&response.body)))
        }
    }

    /// Send user feedback text to the backend.
    pub fn send_feedback(&self, feedback: &str) -> Result<(), NetworkError> {
        let endpoint = MemberEndpoint::CreateFeedback { feedback: feedback.to_string() };
        let request = self.builder.build(&endpoint, &self.session)?;
        let response = self.transport.send(&request)?;
        if response.status == 200 {
            Ok(())
        } else {
            Err(NetworkError::InvalidResponse(json::error_message(&response.body)))
        }
    }

    /// Forget the current identity. Local only; there is no server call.
    pub fn logout(&self) {
        self.session.clear();
    }
}

//! Folder operations.
//!
//! # Design
//! One typed function per backend operation. Each call builds a request,
//! sends it through the transport, and classifies the answer: success
//! decodes the payload, a client error decodes the `message` key path
//! for a user-facing reason, and transport failures propagate as
//! `NetworkError`. Input validation short-circuits before any network
//! traffic.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::endpoint::FolderEndpoint;
use crate::error::NetworkError;
use crate::json;
use crate::request::RequestBuilder;
use crate::session::MemberSession;
use crate::transport::Transport;
use crate::types::Folder;

/// Outcome of a folder create/edit. Validation failures never reach the
/// network; `Duplicate` carries the server's reason (folder names are
/// unique server-side).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderSaveStatus {
    Saved,
    EmptyName,
    Duplicate(String),
}

/// Typed client for the `folders` resource.
pub struct FolderClient {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
    session: MemberSession,
}

impl FolderClient {
    pub fn new(config: &ApiConfig, transport: Arc<dyn Transport>, session: MemberSession) -> Self {
        Self { builder: RequestBuilder::new(config), transport, session }
    }

    /// Fetch all folders. A 200 body that fails to decode degrades to an
    /// empty list; that leniency is for reads only.
    pub fn list_folders(&self) -> Result<Vec<Folder>, NetworkError> {
        let request = self.builder.build(&FolderEndpoint::GetFolders, &self.session)?;
        let response = self.transport.send(&request)?;
        if response.status != 200 {
            return Err(NetworkError::InvalidResponse(json::error_message(&response.body)));
        }
        Ok(json::decode_at_key_path(&response.body, "folderList").unwrap_or_default())
    }

    /// Create a folder named `name`. An empty name short-circuits with
    /// `EmptyName` and no network call.
    pub fn create_folder(&self, name: &str) -> Result<FolderSaveStatus, NetworkError> {
        if name.is_empty() {
            return Ok(FolderSaveStatus::EmptyName);
        }
        let endpoint = FolderEndpoint::CreateFolder { name: name.to_string() };
        let request = self.builder.build(&endpoint, &self.session)?;
        let response = self.transport.send(&request)?;
        if response.status == 200 {
            Ok(FolderSaveStatus::Saved)
        } else {
            Ok(FolderSaveStatus::Duplicate(json::error_message(&response.body)))
        }
    }

    /// Rename `folder`. An unchanged name reports `Saved` without a
    /// network call; success on the wire is a 204.
    pub fn edit_folder(&self, folder: &Folder, new_name: &str) -> Result<FolderSaveStatus, NetworkError> {
        if new_name.is_empty() {
            return Ok(FolderSaveStatus::EmptyName);
        }
        if new_name == folder.name {
            return Ok(FolderSaveStatus::Saved);
        }
        let endpoint = FolderEndpoint::EditFolder { id: folder.id, name: new_name.to_string() };
        let request = self.builder.build(&endpoint, &self.session)?;
        let response = self.transport.send(&request)?;
        if response.status == 204 {
            Ok(FolderSaveStatus::Saved)
        } else {
            Ok(FolderSaveStatus::Duplicate(json::error_message(&response.body)))
        }
    }

    /// Delete a folder. Success on the wire is a 204.
    pub fn delete_folder(&self, id: i64) -> Result<(), NetworkError> {
        let request = self.builder.build(&FolderEndpoint::DeleteFolder { id }, &self.session)?;
        let response = self.transport.send(&request)?;
        if response.status == 204 {
            Ok(())
        } else {
            Err(NetworkError::InvalidResponse(json::error_message(&response.body)))
        }
    }
}

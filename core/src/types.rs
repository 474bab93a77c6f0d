//! Domain models for the linkbox API.
//!
//! # Design
//! Decoding is lenient on purpose: the backend occasionally omits fields,
//! and one malformed entry must degrade rather than fail a whole list.
//! Missing ids fall back to the `-1` sentinel, missing names to the empty
//! string, unparsable URLs to `None`. These types are defined
//! independently from the mock-server crate; integration tests catch
//! schema drift.

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

/// Sentinel id for entries the server sent without one, and for drafts
/// that have not been saved yet.
pub const UNSAVED_ID: i64 = -1;

fn sentinel_id() -> i64 {
    UNSAVED_ID
}

/// Folder classification. Every member gets one `Default` folder at
/// registration; everything user-created is `Personalized`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FolderType {
    Default,
    #[default]
    Personalized,
}

/// A named folder holding saved links.
///
/// `size` is a denormalized link count: bumped optimistically when links
/// are created or deleted locally, authoritative only after a re-fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(default = "sentinel_id")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub folder_type: FolderType,
    #[serde(default)]
    pub size: u32,
}

impl Folder {
    /// A not-yet-saved folder with the given name.
    pub fn draft(name: &str) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.to_string(),
            folder_type: FolderType::Personalized,
            size: 0,
        }
    }

    /// Optimistically count a link created in this folder.
    pub fn record_added_link(&mut self) {
        self.size += 1;
    }

    /// Optimistically count a link removed from this folder.
    pub fn record_removed_link(&mut self) {
        self.size = self.size.saturating_sub(1);
    }
}

/// A saved link. Belongs to exactly one folder, addressed by path
/// segment rather than an embedded foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default = "sentinel_id")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_url", skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Accept a missing, null, or unparsable URL as `None`.
fn lenient_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Url>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| Url::parse(&s).ok()))
}

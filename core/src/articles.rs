//! Link (article) operations.
//!
//! Links live inside folders and are addressed by path segment. Saving a
//! link validates the selected folder, name, and URL before any network
//! traffic; search enforces a minimum query length with a user-facing
//! message. Deleting a link is usually followed by a re-fetch of the
//! folder's links, so `delete_article_and_refresh` chains the two.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::endpoint::FolderEndpoint;
use crate::error::NetworkError;
use crate::json;
use crate::request::RequestBuilder;
use crate::session::MemberSession;
use crate::transport::Transport;
use crate::types::{Article, Folder};

/// Minimum number of characters a search query must have.
pub const MIN_SEARCH_CHARS: usize = 2;

/// Shown when a search query is below [`MIN_SEARCH_CHARS`].
pub const SEARCH_TOO_SHORT_MESSAGE: &str = "enter at least 2 characters";

/// Outcome of saving a link. The validation variants never reach the
/// network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleSaveStatus {
    Saved,
    MissingFolder,
    EmptyName,
    EmptyUrl,
}

/// Outcome of a search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Articles(Vec<Article>),
    /// Query was too short; `message` is ready to show to the user.
    QueryTooShort { message: &'static str },
}

/// Typed client for links within folders.
pub struct ArticleClient {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
    session: MemberSession,
}

impl ArticleClient {
    pub fn new(config: &ApiConfig, transport: Arc<dyn Transport>, session: MemberSession) -> Self {
        Self { builder: RequestBuilder::new(config), transport, session }
    }

    /// Fetch the links in a folder. Decode failures on a 200 body
    /// degrade to an empty list, like every list fetch.
    pub fn list_articles(&self, folder_id: i64) -> Result<Vec<Article>, NetworkError> {
        let endpoint = FolderEndpoint::GetArticlesInFolder { folder_id };
        let request = self.builder.build(&endpoint, &self.session)?;
        let response = self.transport.send(&request)?;
        if response.status != 200 {
            return Err(NetworkError::InvalidResponse(json::error_message(&response.body)));
        }
        Ok(json::decode_at_key_path(&response.body, "articleList").unwrap_or_default())
    }

    /// Save a link into the selected folder. Requires a selected folder,
    /// a non-empty name, and a non-empty URL string; each failure
    /// short-circuits with no network call.
    pub fn create_article(
        &self,
        folder: Option<&Folder>,
        name: &str,
        url: &str,
    ) -> Result<ArticleSaveStatus, NetworkError> {
        let Some(folder) = folder else {
            return Ok(ArticleSaveStatus::MissingFolder);
        };
        if name.is_empty() {
            return Ok(ArticleSaveStatus::EmptyName);
        }
        if url.is_empty() {
            return Ok(ArticleSaveStatus::EmptyUrl);
        }
        let endpoint = FolderEndpoint::CreateArticleInFolder {
            folder_id: folder.id,
            name: name.to_string(),
            url: url.to_string(),
        };
        let request = self.builder.build(&endpoint, &self.session)?;
        let response = self.transport.send(&request)?;
        if response.status == 200 {
            Ok(ArticleSaveStatus::Saved)
        } else {
            Err(NetworkError::InvalidResponse(json::error_message(&response.body)))
        }
    }

    /// Delete one link. Success on the wire is a 204.
    pub fn delete_article(&self, folder_id: i64, article_id: i64) -> Result<(), NetworkError> {
        let endpoint = FolderEndpoint::DeleteArticleInFolder { folder_id, article_id };
        let request = self.builder.build(&endpoint, &self.session)?;
        let response = self.transport.send(&request)?;
        if response.status == 204 {
            Ok(())
        } else {
            Err(NetworkError::InvalidResponse(json::error_message(&response.body)))
        }
    }

    /// Delete a link, then re-fetch the folder's links. Writes and the
    /// read that observes them must be sequenced explicitly; this is that
    /// sequencing.
    pub fn delete_article_and_refresh(
        &self,
        folder_id: i64,
        article_id: i64,
    ) -> Result<Vec<Article>, NetworkError> {
        self.delete_article(folder_id, article_id)?;
        self.list_articles(folder_id)
    }

    /// Search links by content across folders. Queries under
    /// [`MIN_SEARCH_CHARS`] characters short-circuit with a user-facing
    /// message and no network call.
    pub fn search_articles(&self, content: &str) -> Result<SearchResult, NetworkError> {
        if content.chars().count() < MIN_SEARCH_CHARS {
            return Ok(SearchResult::QueryTooShort { message: SEARCH_TOO_SHORT_MESSAGE });
        }
        let endpoint = FolderEndpoint::SearchArticles { content: content.to_string() };
        let request = self.builder.build(&endpoint, &self.session)?;
        let response = self.transport.send(&request)?;
        if response.status != 200 {
            return Err(NetworkError::InvalidResponse(json::error_message(&response.body)));
        }
        let articles = json::decode_at_key_path(&response.body, "articleList").unwrap_or_default();
        Ok(SearchResult::Articles(articles))
    }
}

//! Typed API client core for the linkbox bookmarking service.
//!
//! # Overview
//! Users save links into named folders; this crate is the client side of
//! that contract. Requests are described as plain data (`Endpoint`
//! implementations), turned into `HttpRequest` values by `RequestBuilder`,
//! executed by a `Transport`, and decoded by the nested-key-path JSON
//! decoder in `json`. The resource clients (`FolderClient`,
//! `ArticleClient`, `MemberClient`) compose those pieces into one typed
//! function per backend operation.
//!
//! # Design
//! - Descriptor building and response decoding are pure and synchronous;
//!   only `Transport::send` touches the network. Swapping the transport
//!   for a fake makes every client operation deterministic and testable.
//! - The session identifier is the only shared mutable state, held in
//!   `MemberSession` (single writer, many readers, change listeners).
//! - List responses are wrapped in a named key (`folderList`,
//!   `articleList`); decoding locates that key rather than assuming a
//!   top-level array.
//! - DTOs are defined independently from the mock-server crate; the
//!   integration tests catch schema drift.

pub mod articles;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod folders;
pub mod json;
pub mod members;
pub mod request;
pub mod session;
pub mod transport;
pub mod types;

pub use articles::{ArticleClient, ArticleSaveStatus, SearchResult, SEARCH_TOO_SHORT_MESSAGE};
pub use config::ApiConfig;
pub use endpoint::{
    Endpoint, FolderEndpoint, HeaderKind, HttpMethod, MemberEndpoint, ParamMap, ParamValue,
    RequestParams,
};
pub use error::NetworkError;
pub use folders::{FolderClient, FolderSaveStatus};
pub use json::{decode_at_key_path, DecodeError};
pub use members::MemberClient;
pub use request::{HttpRequest, RequestBuilder};
pub use session::{new_device_id, IdentityStore, MemberSession, MemoryIdentityStore};
pub use transport::{HttpResponse, Transport, UreqTransport};
pub use types::{Article, Folder, FolderType};

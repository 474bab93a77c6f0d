//! Request descriptors for the linkbox API.
//!
//! # Design
//! An endpoint is pure data: a relative path, a method, a header kind, and
//! a parameter mode. `RequestBuilder` turns it into an `HttpRequest`; the
//! descriptor itself never touches configuration, session state, or the
//! network. Parameter maps use the tagged [`ParamValue`] type so the wire
//! stringification of query values stays explicit and testable.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Which header set a request carries.
///
/// `Basic` is content-type only; `Authenticated` adds the `Device-Id`
/// identity header holding the current session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Basic,
    Authenticated,
}

/// A query or body parameter value.
///
/// Query values are coerced to their default string form on the wire,
/// which is lossy for floats and bools; keeping the variants explicit
/// keeps that coercion visible at the call site.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
            // Whole floats keep a trailing .0 so query values match the
            // form the backend has always received.
            ParamValue::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        ParamValue::Float(x)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

/// Ordered parameter map. Order is preserved into the query string so
/// built requests are deterministic.
pub type ParamMap = Vec<(String, ParamValue)>;

/// How an endpoint carries its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestParams {
    /// No query items, no body.
    Plain,
    /// Map entries become URL query items.
    Query(ParamMap),
    /// Map serialized as a JSON object body.
    Body(ParamMap),
    /// Both applied independently.
    QueryAndBody { query: ParamMap, body: ParamMap },
}

/// One API call described declaratively.
pub trait Endpoint {
    /// Path relative to the configured base URL, no leading slash.
    fn path(&self) -> String;
    fn method(&self) -> HttpMethod;
    fn header_kind(&self) -> HeaderKind {
        HeaderKind::Authenticated
    }
    fn params(&self) -> RequestParams {
        RequestParams::Plain
    }
}

fn body(entries: Vec<(&str, ParamValue)>) -> RequestParams {
    RequestParams::Body(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

/// Folder and article operations.
#[derive(Debug, Clone, PartialEq)]
pub enum FolderEndpoint {
    GetFolders,
    CreateFolder { name: String },
    EditFolder { id: i64, name: String },
    DeleteFolder { id: i64 },
    GetArticlesInFolder { folder_id: i64 },
    CreateArticleInFolder { folder_id: i64, name: String, url: String },
    DeleteArticleInFolder { folder_id: i64, article_id: i64 },
    SearchArticles { content: String },
}

impl Endpoint for FolderEndpoint {
    fn path(&self) -> String {
        match self {
            FolderEndpoint::GetFolders | FolderEndpoint::CreateFolder { .. } => {
                "folders".to_string()
            }
            FolderEndpoint::EditFolder { id, .. } | FolderEndpoint::DeleteFolder { id } => {
                format!("folders/{id}")
            }
            FolderEndpoint::GetArticlesInFolder { folder_id }
            | FolderEndpoint::CreateArticleInFolder { folder_id, .. } => {
                format!("folders/{folder_id}/articles")
            }
            FolderEndpoint::DeleteArticleInFolder { folder_id, article_id } => {
                format!("folders/{folder_id}/articles/{article_id}")
            }
            FolderEndpoint::SearchArticles { .. } => "folders/search".to_string(),
        }
    }

    fn method(&self) -> HttpMethod {
        match self {
            FolderEndpoint::GetFolders
            | FolderEndpoint::GetArticlesInFolder { .. }
            | FolderEndpoint::SearchArticles { .. } => HttpMethod::Get,
            FolderEndpoint::CreateFolder { .. } | FolderEndpoint::CreateArticleInFolder { .. } => {
                HttpMethod::Post
            }
            FolderEndpoint::EditFolder { .. } => HttpMethod::Put,
            FolderEndpoint::DeleteFolder { .. } | FolderEndpoint::DeleteArticleInFolder { .. } => {
                HttpMethod::Delete
            }
        }
    }

    fn params(&self) -> RequestParams {
        match self {
            FolderEndpoint::CreateFolder { name } => body(vec![("name", name.as_str().into())]),
            FolderEndpoint::EditFolder { name, .. } => {
                body(vec![("updateName", name.as_str().into())])
            }
            FolderEndpoint::CreateArticleInFolder { name, url, .. } => body(vec![
                ("name", name.as_str().into()),
                ("url", url.as_str().into()),
            ]),
            FolderEndpoint::SearchArticles { content } => RequestParams::Query(vec![(
                "content".to_string(),
                content.as_str().into(),
            )]),
            _ => RequestParams::Plain,
        }
    }
}

/// Member registration and feedback operations.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberEndpoint {
    Register { device_id: String },
    CreateFeedback { feedback: String },
}

impl Endpoint for MemberEndpoint {
    fn path(&self) -> String {
        match self {
            MemberEndpoint::Register { .. } => "members".to_string(),
            MemberEndpoint::CreateFeedback { .. } => "members/feedbacks".to_string(),
        }
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn params(&self) -> RequestParams {
        match self {
            MemberEndpoint::Register { device_id } => {
                body(vec![("deviceId", device_id.as_str().into())])
            }
            MemberEndpoint::CreateFeedback { feedback } => {
                body(vec![("feedback", feedback.as_str().into())])
            }
        }
    }
}

//! Request building: descriptor + configuration + session → `HttpRequest`.
//!
//! # Design
//! Building is pure. The session identifier is read once and baked into
//! the headers, so a request built before a login/logout keeps the
//! identity it was built with. Each call yields an independent value;
//! nothing shared is mutated.

use serde_json::{Map, Number, Value};
use url::Url;

use crate::config::ApiConfig;
use crate::endpoint::{Endpoint, HeaderKind, HttpMethod, ParamMap, ParamValue, RequestParams};
use crate::error::NetworkError;
use crate::session::MemberSession;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Identity header carried by authenticated requests. `Device-Id` is the
/// canonical auth header for this backend.
pub const DEVICE_ID_HEADER: &str = "Device-Id";

/// A fully-formed request described as plain data, ready for a
/// [`crate::transport::Transport`] to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Turns endpoint descriptors into `HttpRequest` values.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
}

impl RequestBuilder {
    pub fn new(config: &ApiConfig) -> Self {
        Self { base_url: config.base_url().clone() }
    }

    /// Build a request for `endpoint`, stamping authenticated requests
    /// with the session identifier current at this moment.
    pub fn build(
        &self,
        endpoint: &dyn Endpoint,
        session: &MemberSession,
    ) -> Result<HttpRequest, NetworkError> {
        let mut url = self
            .base_url
            .join(&endpoint.path())
            .map_err(|_| NetworkError::InvalidUrl)?;

        let headers = match endpoint.header_kind() {
            HeaderKind::Basic => vec![(CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string())],
            HeaderKind::Authenticated => vec![
                (DEVICE_ID_HEADER.to_string(), session.identifier()),
                (CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string()),
            ],
        };

        let body = match endpoint.params() {
            RequestParams::Plain => None,
            RequestParams::Query(query) => {
                append_query(&mut url, &query);
                None
            }
            RequestParams::Body(body) => Some(encode_body(&body)?),
            RequestParams::QueryAndBody { query, body } => {
                append_query(&mut url, &query);
                Some(encode_body(&body)?)
            }
        };

        Ok(HttpRequest { method: endpoint.method(), url, headers, body })
    }
}

fn append_query(url: &mut Url, query: &ParamMap) {
    let mut pairs = url.query_pairs_mut();
    for (key, value) in query {
        pairs.append_pair(key, &value.to_string());
    }
}

fn encode_body(body: &ParamMap) -> Result<String, NetworkError> {
    let mut object = Map::with_capacity(body.len());
    for (key, value) in body {
        object.insert(key.clone(), json_value(value)?);
    }
    Ok(Value::Object(object).to_string())
}

fn json_value(value: &ParamValue) -> Result<Value, NetworkError> {
    Ok(match value {
        ParamValue::Str(s) => Value::String(s.clone()),
        ParamValue::Int(n) => Value::Number((*n).into()),
        ParamValue::Float(x) => Value::Number(Number::from_f64(*x).ok_or_else(|| {
            NetworkError::InvalidRequest(format!("value {x} is not JSON representable"))
        })?),
        ParamValue::Bool(b) => Value::Bool(*b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{FolderEndpoint, MemberEndpoint};
    use crate::session::{MemberSession, MemoryIdentityStore};

    fn builder() -> RequestBuilder {
        RequestBuilder::new(&ApiConfig::new("http://localhost:8080/api/v1/").unwrap())
    }

    fn session(id: &str) -> MemberSession {
        MemberSession::new(MemoryIdentityStore::with_identifier(id))
    }

    #[test]
    fn relative_paths_resolve_under_api_prefix() {
        let req = builder()
            .build(&FolderEndpoint::GetFolders, &session("dev-1"))
            .unwrap();
        assert_eq!(req.url.as_str(), "http://localhost:8080/api/v1/folders");
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.body.is_none());
    }

    #[test]
    fn authenticated_requests_carry_identity_and_content_type() {
        let req = builder()
            .build(&FolderEndpoint::GetFolders, &session("dev-1"))
            .unwrap();
        assert_eq!(
            req.headers,
            vec![
                (DEVICE_ID_HEADER.to_string(), "dev-1".to_string()),
                (CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string()),
            ]
        );
    }

    #[test]
    fn basic_requests_carry_content_type_only() {
        struct Health;
        impl Endpoint for Health {
            fn path(&self) -> String {
                "health".to_string()
            }
            fn method(&self) -> HttpMethod {
                HttpMethod::Get
            }
            fn header_kind(&self) -> HeaderKind {
                HeaderKind::Basic
            }
        }
        let req = builder().build(&Health, &session("dev-1")).unwrap();
        assert_eq!(
            req.headers,
            vec![(CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string())]
        );
    }

    #[test]
    fn built_request_keeps_identity_snapshot() {
        let session = session("before");
        let req = builder().build(&FolderEndpoint::GetFolders, &session).unwrap();
        session.set_identifier("after");
        assert!(req.headers.contains(&(DEVICE_ID_HEADER.to_string(), "before".to_string())));
    }

    #[test]
    fn query_params_become_query_items() {
        let req = builder()
            .build(
                &FolderEndpoint::SearchArticles { content: "rust lang".to_string() },
                &session("dev-1"),
            )
            .unwrap();
        assert_eq!(req.url.query(), Some("content=rust+lang"));
        assert!(req.body.is_none());
    }

    #[test]
    fn body_params_serialize_as_json_object() {
        let req = builder()
            .build(&FolderEndpoint::CreateFolder { name: "Work".to_string() }, &session("dev-1"))
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Work"}));
    }

    #[test]
    fn register_body_matches_wire_shape() {
        let req = builder()
            .build(&MemberEndpoint::Register { device_id: "abc".to_string() }, &session(""))
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"deviceId": "abc"}));
    }

    #[test]
    fn non_finite_float_fails_the_build() {
        struct Bad;
        impl Endpoint for Bad {
            fn path(&self) -> String {
                "folders".to_string()
            }
            fn method(&self) -> HttpMethod {
                HttpMethod::Post
            }
            fn params(&self) -> RequestParams {
                RequestParams::Body(vec![("x".to_string(), ParamValue::Float(f64::NAN))])
            }
        }
        let err = builder().build(&Bad, &session("dev-1")).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidRequest(_)));
    }

    #[test]
    fn query_and_body_apply_independently() {
        struct Both;
        impl Endpoint for Both {
            fn path(&self) -> String {
                "folders/search".to_string()
            }
            fn method(&self) -> HttpMethod {
                HttpMethod::Post
            }
            fn params(&self) -> RequestParams {
                RequestParams::QueryAndBody {
                    query: vec![
                        ("page".to_string(), ParamValue::Int(2)),
                        ("exact".to_string(), ParamValue::Bool(false)),
                    ],
                    body: vec![("content".to_string(), "rust".into())],
                }
            }
        }
        let req = builder().build(&Both, &session("dev-1")).unwrap();
        assert_eq!(req.url.query(), Some("page=2&exact=false"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"content": "rust"}));
    }

    #[test]
    fn builds_are_independent_values() {
        let b = builder();
        let s = session("dev-1");
        let first = b.build(&FolderEndpoint::GetFolders, &s).unwrap();
        let second = b.build(&FolderEndpoint::GetFolders, &s).unwrap();
        assert_eq!(first, second);
    }
}

//! Verify request building against the wire vectors in `test-vectors/`.
//!
//! Each vector names an operation, its inputs, and the exact request the
//! backend expects. Bodies are compared as parsed JSON, not raw strings,
//! to avoid false negatives from field ordering.

use linkbox_core::{
    ApiConfig, Endpoint, FolderEndpoint, MemberEndpoint, MemberSession, MemoryIdentityStore,
    RequestBuilder,
};

fn endpoint_for(op: &str, args: &serde_json::Value) -> Box<dyn Endpoint> {
    let string = |key: &str| args[key].as_str().unwrap().to_string();
    let int = |key: &str| args[key].as_i64().unwrap();
    match op {
        "get_folders" => Box::new(FolderEndpoint::GetFolders),
        "create_folder" => Box::new(FolderEndpoint::CreateFolder { name: string("name") }),
        "edit_folder" => Box::new(FolderEndpoint::EditFolder { id: int("id"), name: string("name") }),
        "delete_folder" => Box::new(FolderEndpoint::DeleteFolder { id: int("id") }),
        "get_articles" => {
            Box::new(FolderEndpoint::GetArticlesInFolder { folder_id: int("folder_id") })
        }
        "create_article" => Box::new(FolderEndpoint::CreateArticleInFolder {
            folder_id: int("folder_id"),
            name: string("name"),
            url: string("url"),
        }),
        "delete_article" => Box::new(FolderEndpoint::DeleteArticleInFolder {
            folder_id: int("folder_id"),
            article_id: int("article_id"),
        }),
        "search_articles" => Box::new(FolderEndpoint::SearchArticles { content: string("content") }),
        "register" => Box::new(MemberEndpoint::Register { device_id: string("device_id") }),
        "create_feedback" => Box::new(MemberEndpoint::CreateFeedback { feedback: string("feedback") }),
        other => panic!("unknown op: {other}"),
    }
}

#[test]
fn endpoint_vectors() {
    let raw = include_str!("../../test-vectors/endpoints.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let config = ApiConfig::new(vectors["base_url"].as_str().unwrap()).unwrap();
    let builder = RequestBuilder::new(&config);
    let device_id = vectors["device_id"].as_str().unwrap();
    let session = MemberSession::new(MemoryIdentityStore::with_identifier(device_id));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let endpoint = endpoint_for(case["op"].as_str().unwrap(), &case["args"]);
        let expected = &case["expected_request"];

        let request = builder.build(endpoint.as_ref(), &session).unwrap();

        assert_eq!(request.method.as_str(), expected["method"].as_str().unwrap(), "{name}: method");
        assert_eq!(request.url.as_str(), expected["url"].as_str().unwrap(), "{name}: url");

        // Every operation in the table is authenticated.
        assert_eq!(
            request.headers,
            vec![
                ("Device-Id".to_string(), device_id.to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            "{name}: headers"
        );

        match (&request.body, &expected["body"]) {
            (None, serde_json::Value::Null) => {}
            (Some(body), expected_body) => {
                let body: serde_json::Value = serde_json::from_str(body).unwrap();
                assert_eq!(&body, expected_body, "{name}: body");
            }
            (None, expected_body) => panic!("{name}: expected body {expected_body}, got none"),
        }
    }
}

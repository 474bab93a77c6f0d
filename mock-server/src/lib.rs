//! In-memory implementation of the linkbox backend wire contract.
//!
//! Used by the core crate's integration tests and runnable standalone.
//! The contract it reproduces: list payloads wrapped in `folderList` /
//! `articleList`, client errors as 400 with a `{"message": …}` body,
//! 204 for successful deletes and edits, and a required `Device-Id`
//! header of a registered member on folder and article routes.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const DEVICE_ID_HEADER: &str = "Device-Id";
pub const DEFAULT_FOLDER_NAME: &str = "Default";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FolderKind {
    #[serde(rename = "DEFAULT")]
    Default,
    #[serde(rename = "PERSONALIZED")]
    Personalized,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FolderSummary {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FolderKind,
    pub size: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Serialize, Deserialize)]
pub struct FolderListBody {
    #[serde(rename = "folderList")]
    pub folder_list: Vec<FolderSummary>,
}

#[derive(Serialize, Deserialize)]
pub struct ArticleListBody {
    #[serde(rename = "articleList")]
    pub article_list: Vec<ArticleRecord>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Clone, Debug)]
struct FolderRecord {
    id: i64,
    name: String,
    kind: FolderKind,
}

#[derive(Default)]
pub struct Store {
    members: HashSet<String>,
    folders: Vec<FolderRecord>,
    articles: HashMap<i64, Vec<ArticleRecord>>,
    next_id: i64,
}

impl Store {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn folder_size(&self, folder_id: i64) -> usize {
        self.articles.get(&folder_id).map_or(0, Vec::len)
    }

    fn summaries(&self) -> Vec<FolderSummary> {
        self.folders
            .iter()
            .map(|f| FolderSummary {
                id: f.id,
                name: f.name.clone(),
                kind: f.kind.clone(),
                size: self.folder_size(f.id),
            })
            .collect()
    }
}

pub type Db = Arc<RwLock<Store>>;

type ClientError = (StatusCode, Json<ErrorBody>);

fn client_error(message: &str) -> ClientError {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { message: message.to_string() }))
}

fn empty_ok() -> Json<serde_json::Value> {
    Json(serde_json::json!({}))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/v1/folders", get(list_folders).post(create_folder))
        .route("/api/v1/folders/search", get(search_articles))
        .route("/api/v1/folders/{id}", axum::routing::put(edit_folder).delete(delete_folder))
        .route("/api/v1/folders/{id}/articles", get(list_articles).post(create_article))
        .route(
            "/api/v1/folders/{id}/articles/{article_id}",
            axum::routing::delete(delete_article),
        )
        .route("/api/v1/members", post(register_member))
        .route("/api/v1/members/feedbacks", post(create_feedback))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn require_member(store: &Store, headers: &HeaderMap) -> Result<(), ClientError> {
    let device_id = headers
        .get(DEVICE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if device_id.is_empty() || !store.members.contains(device_id) {
        return Err(client_error("unregistered device"));
    }
    Ok(())
}

// --- members ---

#[derive(Deserialize)]
struct RegisterBody {
    #[serde(rename = "deviceId")]
    device_id: String,
}

async fn register_member(
    State(db): State<Db>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<serde_json::Value>, ClientError> {
    if body.device_id.is_empty() {
        return Err(client_error("invalid device id"));
    }
    let mut store = db.write().await;
    store.members.insert(body.device_id);
    // Every member sees one non-deletable default folder.
    if store.folders.is_empty() {
        let id = store.allocate_id();
        store.folders.push(FolderRecord {
            id,
            name: DEFAULT_FOLDER_NAME.to_string(),
            kind: FolderKind::Default,
        });
    }
    Ok(empty_ok())
}

#[derive(Deserialize)]
struct FeedbackBody {
    feedback: String,
}

async fn create_feedback(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(body): Json<FeedbackBody>,
) -> Result<Json<serde_json::Value>, ClientError> {
    let store = db.read().await;
    require_member(&store, &headers)?;
    if body.feedback.is_empty() {
        return Err(client_error("feedback is empty"));
    }
    Ok(empty_ok())
}

// --- folders ---

async fn list_folders(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<FolderListBody>, ClientError> {
    let store = db.read().await;
    require_member(&store, &headers)?;
    Ok(Json(FolderListBody { folder_list: store.summaries() }))
}

#[derive(Deserialize)]
struct CreateFolderBody {
    name: String,
}

async fn create_folder(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(body): Json<CreateFolderBody>,
) -> Result<Json<serde_json::Value>, ClientError> {
    let mut store = db.write().await;
    require_member(&store, &headers)?;
    if body.name.is_empty() {
        return Err(client_error("folder name is empty"));
    }
    if store.folders.iter().any(|f| f.name == body.name) {
        return Err(client_error("duplicate folder name"));
    }
    let id = store.allocate_id();
    store.folders.push(FolderRecord { id, name: body.name, kind: FolderKind::Personalized });
    Ok(empty_ok())
}

#[derive(Deserialize)]
struct EditFolderBody {
    #[serde(rename = "updateName")]
    update_name: String,
}

async fn edit_folder(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<EditFolderBody>,
) -> Result<StatusCode, ClientError> {
    let mut store = db.write().await;
    require_member(&store, &headers)?;
    if body.update_name.is_empty() {
        return Err(client_error("folder name is empty"));
    }
    if store.folders.iter().any(|f| f.id != id && f.name == body.update_name) {
        return Err(client_error("duplicate folder name"));
    }
    let folder = store
        .folders
        .iter_mut()
        .find(|f| f.id == id)
        .ok_or_else(|| client_error("folder not found"))?;
    if folder.kind == FolderKind::Default {
        return Err(client_error("cannot rename the default folder"));
    }
    folder.name = body.update_name;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_folder(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, ClientError> {
    let mut store = db.write().await;
    require_member(&store, &headers)?;
    let index = store
        .folders
        .iter()
        .position(|f| f.id == id)
        .ok_or_else(|| client_error("folder not found"))?;
    if store.folders[index].kind == FolderKind::Default {
        return Err(client_error("cannot delete the default folder"));
    }
    store.folders.remove(index);
    store.articles.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

// --- articles ---

async fn list_articles(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ArticleListBody>, ClientError> {
    let store = db.read().await;
    require_member(&store, &headers)?;
    if !store.folders.iter().any(|f| f.id == id) {
        return Err(client_error("folder not found"));
    }
    let article_list = store.articles.get(&id).cloned().unwrap_or_default();
    Ok(Json(ArticleListBody { article_list }))
}

#[derive(Deserialize)]
struct CreateArticleBody {
    name: String,
    url: String,
}

async fn create_article(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<CreateArticleBody>,
) -> Result<Json<serde_json::Value>, ClientError> {
    let mut store = db.write().await;
    require_member(&store, &headers)?;
    if !store.folders.iter().any(|f| f.id == id) {
        return Err(client_error("folder not found"));
    }
    if body.name.is_empty() {
        return Err(client_error("link name is empty"));
    }
    if body.url.is_empty() {
        return Err(client_error("link url is empty"));
    }
    let article_id = store.allocate_id();
    let record = ArticleRecord {
        id: article_id,
        name: body.name,
        url: body.url,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    store.articles.entry(id).or_default().push(record);
    Ok(empty_ok())
}

async fn delete_article(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((id, article_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ClientError> {
    let mut store = db.write().await;
    require_member(&store, &headers)?;
    let articles = store
        .articles
        .get_mut(&id)
        .ok_or_else(|| client_error("link not found"))?;
    let index = articles
        .iter()
        .position(|a| a.id == article_id)
        .ok_or_else(|| client_error("link not found"))?;
    articles.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct SearchQuery {
    content: Option<String>,
}

async fn search_articles(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ArticleListBody>, ClientError> {
    let store = db.read().await;
    require_member(&store, &headers)?;
    let content = query.content.ok_or_else(|| client_error("missing search content"))?;
    let article_list = store
        .articles
        .values()
        .flatten()
        .filter(|a| a.name.contains(&content))
        .cloned()
        .collect();
    Ok(Json(ArticleListBody { article_list }))
}

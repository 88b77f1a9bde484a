//! In-memory stand-in for the Basecamp API and its launchpad host.
//!
//! Serves one account (`ACCOUNT_ID`) under `/{ACCOUNT_ID}/api/v1` and the
//! launchpad authorization routes at the root. Every API route requires
//! `Authorization: Bearer {TOKEN}` and answers 401 otherwise.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ACCOUNT_ID: u64 = 999;
pub const TOKEN: &str = "mock-token";
pub const REFRESH_TOKEN: &str = "mock-refresh";
pub const CLIENT_ID: &str = "mock-client";
pub const CLIENT_SECRET: &str = "mock-secret";
pub const AUTH_CODE: &str = "mock-code";
pub const ME_ID: u64 = 1;
pub const PAGE_SIZE: usize = 50;

/// 2024-01-01T00:00:00Z, first timestamp of seeded events.
const SEED_START: i64 = 1_704_067_200;

/// Everything the server knows. Ids come from one shared counter.
#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    projects: BTreeMap<u64, Value>,
    accesses: BTreeMap<u64, Vec<Value>>,
    todolists: BTreeMap<u64, Value>,
    todos: BTreeMap<u64, Value>,
    events: Vec<Value>,
    pending_attachments: BTreeMap<String, Value>,
    attachments: BTreeMap<u64, Vec<Value>>,
}

impl Store {
    /// Store pre-filled with `count` account events, one minute apart
    /// starting at 2024-01-01T00:00:00Z.
    pub fn with_events(count: usize) -> Self {
        let mut store = Self::default();
        let start = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(SEED_START);
        for i in 0..count {
            let at = start + Duration::minutes(i as i64);
            store.record_event(&format!("seeded event {i}"), at);
        }
        store
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn record_event(&mut self, summary: &str, at: DateTime<Utc>) {
        let id = self.next_id();
        self.events.push(json!({
            "id": id,
            "summary": summary,
            "created_at": at.to_rfc3339(),
        }));
    }

    fn project_exists(&self, project_id: u64) -> Result<(), StatusCode> {
        if self.projects.contains_key(&project_id) {
            Ok(())
        } else {
            Err(StatusCode::NOT_FOUND)
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
}

pub fn app() -> Router {
    app_with(Store::default())
}

pub fn app_with(store: Store) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(store)),
    };
    let guard = middleware::from_fn(require_token);

    let api = Router::new()
        .route("/projects.json", get(list_projects).post(create_project))
        .route("/projects/{id}", get(get_project).put(update_project).delete(delete_project))
        .route("/projects/{id}/accesses.json", get(list_accesses).post(grant_access))
        .route("/projects/{id}/accesses/{person}", axum::routing::delete(revoke_access))
        .route("/projects/{id}/todolists.json", get(list_todolists).post(create_todolist))
        .route("/projects/{id}/todolists/{list}", get(get_todolist).put(update_todolist))
        .route("/projects/{id}/todolists/{list}/todos.json", post(create_todo))
        .route("/projects/{id}/todos/{todo}", get(get_todo).put(update_todo).delete(delete_todo))
        .route("/projects/{id}/uploads.json", post(create_upload))
        .route("/projects/{id}/attachments.json", get(list_attachments))
        .route("/events.json", get(list_events))
        .route("/attachments.json", post(upload_attachment))
        .route("/people/{id}", get(get_person))
        .route_layer(guard.clone());

    let launchpad = Router::new()
        .route("/authorization.json", get(authorization))
        .route_layer(guard);

    Router::new()
        .nest(&format!("/{ACCOUNT_ID}/api/v1"), api)
        .merge(launchpad)
        .route("/authorization/token", post(exchange_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Store::default()).await
}

pub async fn run_with(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

async fn require_token(request: Request, next: Next) -> Response {
    let expected = format!("Bearer {TOKEN}");
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}

/// Parses the id out of a `"<id>.json"` path segment.
fn json_id(segment: &str) -> Result<u64, StatusCode> {
    segment
        .strip_suffix(".json")
        .and_then(|id| id.parse().ok())
        .ok_or(StatusCode::NOT_FOUND)
}

/// Copies the keys of `patch` over `target`.
fn merge(target: &mut Value, patch: Value) -> Result<(), StatusCode> {
    let Value::Object(patch) = patch else {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };
    if let Value::Object(target) = target {
        for (key, value) in patch {
            target.insert(key, value);
        }
    }
    Ok(())
}

fn required_str(body: &Value, key: &str) -> Result<String, StatusCode> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<usize>,
    since: Option<String>,
}

fn page_of(items: &[Value], page: Option<usize>) -> Vec<Value> {
    let page = page.unwrap_or(1).max(1);
    items
        .iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .cloned()
        .collect()
}

fn parse_since(raw: &str) -> Result<DateTime<FixedOffset>, StatusCode> {
    DateTime::parse_from_rfc3339(raw).map_err(|_| StatusCode::BAD_REQUEST)
}

// --- projects ---

async fn list_projects(State(state): State<AppState>) -> Json<Vec<Value>> {
    let store = state.db.read().await;
    Json(
        store
            .projects
            .values()
            .filter(|p| p["archived"] == false)
            .cloned()
            .collect(),
    )
}

async fn create_project(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let name = required_str(&body, "name")?;
    let mut store = state.db.write().await;
    let id = store.next_id();
    let project = json!({
        "id": id,
        "name": name,
        "description": body.get("description").cloned().unwrap_or(Value::Null),
        "archived": false,
    });
    store.projects.insert(id, project.clone());
    store.record_event(&format!("created project {name}"), Utc::now());
    Ok((StatusCode::CREATED, Json(project)))
}

async fn get_project(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    let store = state.db.read().await;
    if id == "archived.json" {
        let archived = store
            .projects
            .values()
            .filter(|p| p["archived"] == true)
            .cloned()
            .collect();
        return Ok(Json(Value::Array(archived)));
    }
    store
        .projects
        .get(&json_id(&id)?)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = state.db.write().await;
    let project = store.projects.get_mut(&json_id(&id)?).ok_or(StatusCode::NOT_FOUND)?;
    merge(project, body)?;
    Ok(Json(project.clone()))
}

async fn delete_project(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    let Ok(id) = json_id(&id) else {
        return StatusCode::NOT_FOUND;
    };
    let mut store = state.db.write().await;
    match store.projects.remove(&id) {
        Some(_) => {
            store.accesses.remove(&id);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

// --- accesses ---

async fn list_accesses(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Vec<Value>>, StatusCode> {
    let store = state.db.read().await;
    store.project_exists(id)?;
    Ok(Json(store.accesses.get(&id).cloned().unwrap_or_default()))
}

async fn grant_access(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<StatusCode, StatusCode> {
    let mut store = state.db.write().await;
    store.project_exists(id)?;
    let ids: Vec<u64> = body["ids"]
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_u64).collect())
        .unwrap_or_default();
    let emails: Vec<String> = body["email_addresses"]
        .as_array()
        .map(|e| e.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default();

    let mut granted: Vec<Value> = ids.into_iter().map(|pid| json!({"id": pid})).collect();
    for email in emails {
        let pid = store.next_id();
        granted.push(json!({"id": pid, "email_address": email}));
    }
    store.accesses.entry(id).or_default().extend(granted);
    Ok(StatusCode::NO_CONTENT)
}

async fn revoke_access(State(state): State<AppState>, Path((id, person)): Path<(u64, String)>) -> StatusCode {
    let Ok(person) = json_id(&person) else {
        return StatusCode::NOT_FOUND;
    };
    let mut store = state.db.write().await;
    let Some(people) = store.accesses.get_mut(&id) else {
        return StatusCode::NOT_FOUND;
    };
    let before = people.len();
    people.retain(|p| p["id"] != person);
    if people.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

// --- todo lists and todos ---

async fn list_todolists(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Vec<Value>>, StatusCode> {
    let store = state.db.read().await;
    store.project_exists(id)?;
    Ok(Json(
        store
            .todolists
            .values()
            .filter(|l| l["project_id"] == id)
            .cloned()
            .collect(),
    ))
}

async fn create_todolist(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let name = required_str(&body, "name")?;
    let mut store = state.db.write().await;
    store.project_exists(id)?;
    let list_id = store.next_id();
    let list = json!({
        "id": list_id,
        "project_id": id,
        "name": name,
        "description": body.get("description").cloned().unwrap_or(Value::Null),
        "position": Value::Null,
        "completed": false,
    });
    store.todolists.insert(list_id, list.clone());
    Ok((StatusCode::CREATED, Json(list)))
}

async fn get_todolist(
    State(state): State<AppState>,
    Path((id, list)): Path<(u64, String)>,
) -> Result<Json<Value>, StatusCode> {
    let store = state.db.read().await;
    let list = store.todolists.get(&json_id(&list)?).ok_or(StatusCode::NOT_FOUND)?;
    if list["project_id"] != id {
        return Err(StatusCode::NOT_FOUND);
    }
    let mut list = list.clone();
    let todos: Vec<Value> = store
        .todos
        .values()
        .filter(|t| t["todolist_id"] == list["id"])
        .cloned()
        .collect();
    list["todos"] = Value::Array(todos);
    Ok(Json(list))
}

async fn update_todolist(
    State(state): State<AppState>,
    Path((id, list)): Path<(u64, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = state.db.write().await;
    let list = store.todolists.get_mut(&json_id(&list)?).ok_or(StatusCode::NOT_FOUND)?;
    if list["project_id"] != id {
        return Err(StatusCode::NOT_FOUND);
    }
    merge(list, body)?;
    Ok(Json(list.clone()))
}

async fn create_todo(
    State(state): State<AppState>,
    Path((id, list)): Path<(u64, u64)>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let content = required_str(&body, "content")?;
    let mut store = state.db.write().await;
    match store.todolists.get(&list) {
        Some(l) if l["project_id"] == id => {}
        _ => return Err(StatusCode::NOT_FOUND),
    }
    let todo_id = store.next_id();
    let mut todo = json!({
        "id": todo_id,
        "todolist_id": list,
        "content": content,
        "due_at": Value::Null,
        "assignee": Value::Null,
        "completed": false,
    });
    merge(&mut todo, body)?;
    store.todos.insert(todo_id, todo.clone());
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(State(state): State<AppState>, Path((_, todo)): Path<(u64, String)>) -> Result<Json<Value>, StatusCode> {
    let store = state.db.read().await;
    store
        .todos
        .get(&json_id(&todo)?)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(state): State<AppState>,
    Path((_, todo)): Path<(u64, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = state.db.write().await;
    let todo = store.todos.get_mut(&json_id(&todo)?).ok_or(StatusCode::NOT_FOUND)?;
    merge(todo, body)?;
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(state): State<AppState>, Path((_, todo)): Path<(u64, String)>) -> StatusCode {
    let Ok(todo) = json_id(&todo) else {
        return StatusCode::NOT_FOUND;
    };
    let mut store = state.db.write().await;
    match store.todos.remove(&todo) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

// --- attachments and uploads ---

async fn upload_attachment(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    let token = Uuid::new_v4().to_string();
    let pending = json!({
        "token": token,
        "content_type": content_type,
        "byte_size": body.len(),
    });
    state
        .db
        .write()
        .await
        .pending_attachments
        .insert(token.clone(), pending.clone());
    Json(pending)
}

async fn create_upload(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let refs = body["attachments"]
        .as_array()
        .cloned()
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let mut store = state.db.write().await;
    store.project_exists(id)?;

    let mut attached = Vec::new();
    for reference in refs {
        let token = required_str(&reference, "token")?;
        let name = required_str(&reference, "name")?;
        let mut attachment = store
            .pending_attachments
            .remove(&token)
            .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
        let attachment_id = store.next_id();
        let extra: Map<String, Value> = [
            ("id".to_string(), json!(attachment_id)),
            ("name".to_string(), json!(name)),
            ("project_id".to_string(), json!(id)),
        ]
        .into_iter()
        .collect();
        merge(&mut attachment, Value::Object(extra))?;
        attached.push(attachment);
    }
    store.attachments.entry(id).or_default().extend(attached.clone());

    let upload_id = store.next_id();
    let upload = json!({
        "id": upload_id,
        "content": body.get("content").cloned().unwrap_or(Value::Null),
        "attachments": attached,
    });
    Ok((StatusCode::CREATED, Json(upload)))
}

async fn list_attachments(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    let store = state.db.read().await;
    store.project_exists(id)?;
    let all = store.attachments.get(&id).cloned().unwrap_or_default();
    Ok(Json(page_of(&all, query.page)))
}

// --- events and people ---

async fn list_events(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Result<Json<Vec<Value>>, StatusCode> {
    let store = state.db.read().await;
    let events: Vec<Value> = match query.since.as_deref() {
        Some(raw) => {
            let since = parse_since(raw)?;
            store
                .events
                .iter()
                .filter(|e| {
                    e["created_at"]
                        .as_str()
                        .and_then(|at| DateTime::parse_from_rfc3339(at).ok())
                        .is_some_and(|at| at > since)
                })
                .cloned()
                .collect()
        }
        None => store.events.clone(),
    };
    Ok(Json(page_of(&events, query.page)))
}

async fn get_person(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    let me = json!({"id": ME_ID, "name": "Mock Person", "email_address": "mock@example.com"});
    if id == "me.json" || json_id(&id)? == ME_ID {
        return Ok(Json(me));
    }
    Err(StatusCode::NOT_FOUND)
}

// --- launchpad ---

async fn authorization() -> Json<Value> {
    Json(json!({
        "identity": {"id": ME_ID, "email_address": "mock@example.com"},
        "accounts": [
            {"id": ACCOUNT_ID, "product": "bcx", "name": "Mock Co"},
            {"id": 2, "product": "basecamp", "name": "Mock Classic"},
            {"id": 3, "product": "highrise", "name": "Mock CRM"},
        ],
    }))
}

#[derive(Deserialize)]
struct TokenQuery {
    #[serde(rename = "type")]
    kind: String,
    client_id: String,
    client_secret: String,
    code: String,
}

async fn exchange_token(Query(query): Query<TokenQuery>) -> Result<Json<Value>, StatusCode> {
    let valid = query.kind == "web_server"
        && query.client_id == CLIENT_ID
        && query.client_secret == CLIENT_SECRET
        && query.code == AUTH_CODE;
    if !valid {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({
        "access_token": TOKEN,
        "refresh_token": REFRESH_TOKEN,
        "expires_in": 1_209_600,
    })))
}

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::header::{CONTENT_TYPE, COOKIE},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{AppendHeaders, IntoResponse},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListFilter {
    pub active: Option<bool>,
    pub limit: Option<usize>,
}

/// What the echo endpoint saw in the request, reflected back as JSON.
///
/// `headers` holds every `x-` request header line in arrival order,
/// `cookies` every `cookie` header line unmerged, so clients can verify
/// exactly what reached the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub cookies: Vec<String>,
    pub content_type: Option<String>,
    pub body: String,
}

pub type Db = Arc<RwLock<HashMap<Uuid, User>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/echo", any(echo))
        .route("/echo/{*rest}", any(echo))
        .route("/token", post(issue_token))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(
    State(db): State<Db>,
    Query(filter): Query<ListFilter>,
) -> impl IntoResponse {
    let users = db.read().await;
    let mut matched: Vec<User> = users
        .values()
        .filter(|u| filter.active.map_or(true, |want| u.active == want))
        .cloned()
        .collect();
    matched.sort_by(|a, b| a.name.cmp(&b.name));

    let total = matched.len();
    if let Some(limit) = filter.limit {
        matched.truncate(limit);
    }

    (
        AppendHeaders([("x-total-count", total.to_string())]),
        Json(matched),
    )
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<User>) {
    let user = User {
        id: Uuid::new_v4(),
        name: input.name,
        active: input.active,
    };
    db.write().await.insert(user.id, user.clone());
    (StatusCode::CREATED, Json(user))
}

async fn get_user(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, StatusCode> {
    let users = db.read().await;
    users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, StatusCode> {
    let mut users = db.write().await;
    let user = users.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(active) = input.active {
        user.active = active;
    }
    Ok(Json(user.clone()))
}

async fn delete_user(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut users = db.write().await;
    users.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

async fn echo(
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let reflected: Vec<(String, String)> = headers
        .iter()
        .filter(|(name, _)| name.as_str().starts_with("x-"))
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
        })
        .collect();
    let cookies: Vec<String> = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect();
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let echo = Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        headers: reflected,
        cookies,
        content_type,
        body,
    };

    (
        AppendHeaders([
            ("x-request-id", Uuid::new_v4().to_string()),
            ("set-cookie", "session=echo; Path=/".to_string()),
            ("set-cookie", "theme=light".to_string()),
        ]),
        Json(echo),
    )
}

async fn issue_token() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "application/x-www-form-urlencoded")],
        "access_token=abc123&token_type=bearer&expires_in=3600",
    )
}

//! User HTTP Routes
//!
//! CRUD, search and login endpoints over the `users` table.
//!
//! Every handler is a final error boundary: anything that fails inside it is
//! turned into a JSON response, never propagated further.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequestParts, Json, Path, Query, State},
    http::{request::Parts, StatusCode},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::errors::{ApiError, ApiResult};
use crate::storage::{Database, User};
use crate::validation::{is_valid_email, is_valid_password};

// ==================
// Shared State
// ==================

/// State shared across user handlers
pub struct UserState {
    pub db: Database,
}

impl UserState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// User routes with shared state
pub fn user_routes(state: Arc<UserState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/user/:id",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .route("/search", get(search_users_handler))
        .route("/login", post(login_handler))
        .with_state(state)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl LoginResponse {
    pub fn success(user_id: i64) -> Self {
        Self {
            status: "success",
            user_id: Some(user_id),
        }
    }

    pub fn failed() -> Self {
        Self {
            status: "failed",
            user_id: None,
        }
    }
}

/// The `{id}` path segment as text.
///
/// Never rejects: a segment that does not percent-decode to UTF-8 is kept in
/// its raw, still-encoded form. Storage compares it under INTEGER affinity, so
/// anything that is not numeric simply matches no row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSegment(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for IdSegment
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                debug!(%rejection, "keeping undecodable id segment raw");
                let raw = parts.uri.path().rsplit('/').next().unwrap_or_default();
                Ok(Self(raw.to_owned()))
            }
        }
    }
}

/// Query parameters in request order; repeated keys are all kept.
type QueryPairs = Query<Vec<(String, String)>>;

/// First value given for `key`, like a form lookup
fn first_value(pairs: Vec<(String, String)>, key: &str) -> Option<String> {
    pairs
        .into_iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value)
}

type JsonBody = Result<Json<Value>, JsonRejection>;

/// Require a non-empty JSON object carrying every key in `keys`
fn require_fields<'a>(body: &'a Value, keys: &[&str]) -> ApiResult<&'a Map<String, Value>> {
    let fields = body
        .as_object()
        .filter(|fields| !fields.is_empty())
        .ok_or(ApiError::MissingFields)?;

    if keys.iter().all(|key| fields.contains_key(*key)) {
        Ok(fields)
    } else {
        Err(ApiError::MissingFields)
    }
}

fn valid_email(fields: &Map<String, Value>) -> ApiResult<String> {
    fields
        .get("email")
        .and_then(Value::as_str)
        .filter(|email| is_valid_email(email))
        .map(str::to_owned)
        .ok_or(ApiError::InvalidEmail)
}

fn name_field(fields: &Map<String, Value>) -> ApiResult<String> {
    fields
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(ApiError::InvalidFieldType("name"))
}

// ==================
// Handlers
// ==================

/// Service banner
async fn home_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("User Management System"))
}

/// List every user
async fn list_users_handler(State(state): State<Arc<UserState>>) -> ApiResult<Json<Vec<User>>> {
    let users = state.db.run(|store| store.list_all()).await?;
    debug!(count = users.len(), "listed users");
    Ok(Json(users))
}

/// Fetch one user by id
async fn get_user_handler(
    State(state): State<Arc<UserState>>,
    IdSegment(id): IdSegment,
) -> ApiResult<Json<User>> {
    state
        .db
        .run(move |store| store.get_by_id(id.as_str()))
        .await?
        .map(Json)
        .ok_or(ApiError::UserNotFound)
}

/// Create a user from `name`, `email` and `password`
async fn create_user_handler(
    State(state): State<Arc<UserState>>,
    body: JsonBody,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(body) = body?;
    let fields = require_fields(&body, &["name", "email", "password"])?;

    let email = valid_email(fields)?;
    let password = fields
        .get("password")
        .and_then(Value::as_str)
        .filter(|password| is_valid_password(password))
        .map(str::to_owned)
        .ok_or(ApiError::InvalidPassword)?;
    let name = name_field(fields)?;

    let id = state
        .db
        .run(move |store| store.insert(&name, &email, &password))
        .await?;
    info!(user_id = id, "user created");

    Ok((StatusCode::CREATED, Json(MessageResponse::new("User created"))))
}

/// Replace a user's name and email. The password is left untouched.
async fn update_user_handler(
    State(state): State<Arc<UserState>>,
    IdSegment(id): IdSegment,
    body: JsonBody,
) -> ApiResult<Json<MessageResponse>> {
    let Json(body) = body?;
    let fields = require_fields(&body, &["name", "email"])?;

    let email = valid_email(fields)?;
    let name = name_field(fields)?;

    let changed = state
        .db
        .run(move |store| store.update(id.as_str(), &name, &email))
        .await?;
    info!(changed, "user updated");

    Ok(Json(MessageResponse::new("User updated")))
}

/// Delete a user. Deleting an id that does not exist still succeeds.
async fn delete_user_handler(
    State(state): State<Arc<UserState>>,
    IdSegment(id): IdSegment,
) -> ApiResult<Json<MessageResponse>> {
    let message = format!("User {} deleted", id);
    let removed = state
        .db
        .run(move |store| store.delete(id.as_str()))
        .await?;
    info!(removed, "user deleted");

    Ok(Json(MessageResponse::new(message)))
}

/// Users whose name contains the `name` query parameter
async fn search_users_handler(
    State(state): State<Arc<UserState>>,
    Query(pairs): QueryPairs,
) -> ApiResult<Json<Vec<User>>> {
    let fragment = first_value(pairs, "name")
        .filter(|name| !name.is_empty())
        .ok_or(ApiError::MissingSearchName)?;

    let users = state
        .db
        .run(move |store| store.search_by_name(&fragment))
        .await?;
    debug!(count = users.len(), "search matched users");
    Ok(Json(users))
}

/// Check an email/password pair
async fn login_handler(
    State(state): State<Arc<UserState>>,
    body: JsonBody,
) -> ApiResult<(StatusCode, Json<LoginResponse>)> {
    let Json(body) = body?;
    let fields = require_fields(&body, &["email", "password"])?;

    // Non-string credentials can never equal a stored row.
    let credentials = fields
        .get("email")
        .and_then(Value::as_str)
        .zip(fields.get("password").and_then(Value::as_str))
        .map(|(email, password)| (email.to_owned(), password.to_owned()));

    let user = match credentials {
        Some((email, password)) => {
            state
                .db
                .run(move |store| store.authenticate(&email, &password))
                .await?
        }
        None => None,
    };

    match user {
        Some(user) => {
            info!(user_id = user.id, "login succeeded");
            Ok((StatusCode::OK, Json(LoginResponse::success(user.id))))
        }
        None => {
            debug!("login failed");
            Ok((StatusCode::UNAUTHORIZED, Json(LoginResponse::failed())))
        }
    }
}

//! Axum route handlers for the userdir API.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use userdir_core::{PathIdMode, User, UserDraft, UserId, UserStore};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs,
    error::{ErrorBody, GatewayError, MessageBody},
};

/// Prefix every user route is mounted under.
pub const API_BASE_PATH: &str = "/api/v1";
/// Where the interactive documentation UI is served.
pub const SWAGGER_PATH: &str = "/swagger";
/// Where the raw OpenAPI document is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

// ── Shared state ─────────────────────────────────────────────────────────────

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    store: Arc<UserStore>,
    path_ids: PathIdMode,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<UserStore>, path_ids: PathIdMode) -> Self {
        Self { store, path_ids }
    }

    #[must_use]
    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// Resolve the `{id}` segment under this state's [`PathIdMode`].
    ///
    /// A segment axum cannot extract (it percent-decodes to invalid UTF-8)
    /// is treated like any other non-integer: id `0` when lenient, a 400
    /// when strict.
    fn user_id(&self, raw: Result<Path<String>, PathRejection>) -> Result<UserId, GatewayError> {
        match raw {
            Ok(Path(raw)) => Ok(self.path_ids.parse(&raw)?),
            Err(rejection) => match self.path_ids {
                PathIdMode::Lenient => Ok(UserId::new(0)),
                PathIdMode::Strict => Err(GatewayError::InvalidPathId(format!(
                    "invalid user id: {}",
                    rejection.body_text()
                ))),
            },
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router around the given state.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(state);

    Router::new()
        .nest(API_BASE_PATH, api)
        .merge(SwaggerUi::new(SWAGGER_PATH).url(OPENAPI_PATH, docs::openapi()))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health`: liveness check.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /users`: every user in insertion order.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    summary = "List users",
    description = "get users",
    responses(
        (status = 200, description = "All users", body = [User]),
    ),
)]
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store.list())
}

/// `GET /users/{id}`: a single user.
///
/// # Errors
/// Returns [`GatewayError::UserNotFound`] if no user has the id, or
/// [`GatewayError::InvalidPathId`] under strict id parsing.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    summary = "Get a user by ID",
    description = "get user by ID",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 400, description = "Unparsable id (strict mode only)", body = ErrorBody),
        (status = 404, description = "No such user", body = MessageBody),
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<User>, GatewayError> {
    let id = state.user_id(raw_id)?;
    Ok(Json(state.store.find_by_id(id)?))
}

/// `POST /users`: create a user; the store assigns the id.
///
/// The body is decoded whatever its `Content-Type`.
///
/// # Errors
/// Returns [`GatewayError::InvalidBody`] if the body does not decode.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    summary = "Create a user",
    description = "create user",
    request_body(content = UserDraft, description = "New User", content_type = "application/json"),
    responses(
        (status = 201, description = "The created user", body = User),
        (status = 400, description = "Malformed body", body = ErrorBody),
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, GatewayError> {
    let draft = UserDraft::from_json(&body)?;
    let user = state.store.create(draft);
    Ok((StatusCode::CREATED, Json(user)))
}

/// `PUT /users/{id}`: replace every field of a user except its id.
///
/// # Errors
/// Returns [`GatewayError::InvalidBody`] if the body does not decode (checked
/// before the lookup), or [`GatewayError::UserNotFound`] if no user has the id.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    summary = "Update a user",
    description = "update user",
    params(("id" = i64, Path, description = "User ID")),
    request_body(content = UserDraft, description = "Updated User", content_type = "application/json"),
    responses(
        (status = 200, description = "The updated user", body = User),
        (status = 400, description = "Malformed body or id", body = ErrorBody),
        (status = 404, description = "No such user", body = MessageBody),
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<User>, GatewayError> {
    let id = state.user_id(raw_id)?;
    let draft = UserDraft::from_json(&body)?;
    Ok(Json(state.store.replace(id, draft)?))
}

/// `DELETE /users/{id}`: remove a user.
///
/// # Errors
/// Returns [`GatewayError::UserNotFound`] if no user has the id.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    summary = "Delete a user",
    description = "delete user",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Unparsable id (strict mode only)", body = ErrorBody),
        (status = 404, description = "No such user", body = MessageBody),
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let id = state.user_id(raw_id)?;
    state.store.delete(id)?;
    // 204 may not carry a body, so the empty object is dropped.
    Ok((
        StatusCode::NO_CONTENT,
        [(header::CONTENT_TYPE, "application/json")],
    ))
}

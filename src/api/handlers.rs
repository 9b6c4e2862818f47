//! REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::CookieJar;

use super::body::{bad_request, RequestBody};
use super::client::ClientAddr;
use super::cookie::CookieConfig;
use super::types::{
    ErrorResponse, ListSessionsResponse, LoginRequest, LoginResponse, MessageResponse,
    SessionIdRequest, SessionStatusResponse, UpdateRequest, UpdateResponse, WelcomeResponse,
};
use crate::error::SessionTrackerError;
use crate::session::{SessionId, SessionRegistry};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    pub cookies: Arc<CookieConfig>,
    /// Take the caller address from `X-Forwarded-For` when present.
    pub trust_forwarded_for: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_registry(SessionRegistry::new())
    }

    pub fn with_registry(registry: SessionRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            cookies: Arc::new(CookieConfig::default()),
            trust_forwarded_for: false,
        }
    }

    pub fn with_cookies(mut self, cookies: CookieConfig) -> Self {
        self.cookies = Arc::new(cookies);
        self
    }

    pub fn with_trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn error_response(err: SessionTrackerError) -> ApiError {
    if !err.is_client_error() {
        tracing::error!("request failed: {}", err);
    }
    (err.status_code(), Json(ErrorResponse::from_error(&err)))
}

/// Session id for operations that report a missing id as not-found.
fn existing_id(raw: Option<&str>) -> Result<SessionId, ApiError> {
    raw.ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::session_not_found()),
        )
    })?
    .parse()
    .map_err(error_response)
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Welcome endpoint.
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse::default())
}

/// Log in and open a session.
pub async fn login(
    State(state): State<AppState>,
    client: ClientAddr,
    jar: CookieJar,
    RequestBody(req): RequestBody<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let record = state
        .registry
        .create(req, client.as_str())
        .map_err(error_response)?;

    let jar = state.cookies.issue(jar, &record.session_id);
    Ok((jar, Json(LoginResponse::new(record))))
}

/// Close a session.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    RequestBody(req): RequestBody<SessionIdRequest>,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let id = existing_id(req.session_id())?;
    state.registry.delete(&id).map_err(error_response)?;

    let jar = state.cookies.revoke(jar);
    Ok((jar, Json(MessageResponse::new("Logout successful"))))
}

/// Update a session's identity fields and mark it as accessed.
pub async fn update(
    State(state): State<AppState>,
    client: ClientAddr,
    jar: CookieJar,
    RequestBody(req): RequestBody<UpdateRequest>,
) -> Result<(CookieJar, Json<UpdateResponse>), ApiError> {
    let id = existing_id(req.session_id())?;
    let record = state
        .registry
        .update(&id, req.fields, client.as_str())
        .map_err(error_response)?;

    let jar = state.cookies.issue(jar, &record.session_id);
    Ok((jar, Json(UpdateResponse::new(record))))
}

/// Report a session with its duration and idle time.
///
/// The id may come from the query string or from the request body; the
/// query string wins when both are present.
pub async fn status(
    State(state): State<AppState>,
    client: ClientAddr,
    query: Result<Query<SessionIdRequest>, QueryRejection>,
    RequestBody(from_body): RequestBody<SessionIdRequest>,
) -> Result<Json<SessionStatusResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| bad_request(rejection.body_text()))?;

    let raw = query.session_id().or_else(|| from_body.session_id());
    let id: SessionId = raw
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::missing_session_id()),
            )
        })?
        .parse()
        .map_err(error_response)?;

    let snapshot = state
        .registry
        .read(&id, client.as_str())
        .map_err(error_response)?;

    Ok(Json(SessionStatusResponse::from_snapshot(snapshot)))
}

/// List all live sessions.
pub async fn list_sessions(
    State(state): State<AppState>,
    client: ClientAddr,
) -> Result<Json<ListSessionsResponse>, ApiError> {
    let sessions = state
        .registry
        .list(client.as_str())
        .map_err(error_response)?;

    Ok(Json(ListSessionsResponse::new(sessions)))
}

// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the chat page and session API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use waypoint_core::types::HealthStatus;
use waypoint_core::WaypointError;
use waypoint_session::{warning_text, SessionSnapshot, Turn};

use crate::server::GatewayState;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Request body for POST /api/sessions/{id}/messages.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

/// Response body for POST /api/sessions/{id}/messages.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub user: Turn,
    pub reply: Turn,
    pub total_messages: usize,
}

/// Response body for POST /api/sessions/{id}/end.
///
/// Exactly one of `summary` (with `path`) or `warning` is set.
#[derive(Debug, Serialize)]
pub struct EndResponse {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" or "degraded".
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub provider: String,
    pub active_sessions: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Maps a domain error to a status code and JSON body.
fn error_response(err: WaypointError) -> Response {
    let status = match &err {
        WaypointError::EmptyMessage => StatusCode::BAD_REQUEST,
        WaypointError::SessionInactive => StatusCode::CONFLICT,
        WaypointError::SessionNotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let provider = state.coach.provider();
    let status = match provider.health_check().await {
        Ok(HealthStatus::Healthy) => "ok",
        Ok(_) | Err(_) => "degraded",
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        provider: provider.name().to_string(),
        active_sessions: state.registry.len(),
    })
}

/// POST /api/sessions
pub async fn create_session(State(state): State<GatewayState>) -> Response {
    let (_, handle) = state.registry.create();
    let snapshot = handle.lock().await.snapshot();
    (StatusCode::CREATED, Json(snapshot)).into_response()
}

/// GET /api/sessions/{id}
pub async fn get_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, Response> {
    let handle = state.registry.get(&id).map_err(error_response)?;
    let snapshot = handle.lock().await.snapshot();
    Ok(Json(snapshot))
}

/// DELETE /api/sessions/{id}
pub async fn delete_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Response {
    if state.registry.remove(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error_response(WaypointError::SessionNotFound { id })
    }
}

/// POST /api/sessions/{id}/messages
///
/// Provider failures still answer 200; the reply turn carries the warning.
pub async fn post_message(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, Response> {
    let handle = state.registry.get(&id).map_err(error_response)?;
    let mut session = handle.lock().await;

    let exchange = state
        .coach
        .submit(&mut session, &body.content)
        .await
        .map_err(error_response)?;
    debug!(session_id = id.as_str(), warning = exchange.is_warning(), "message handled");

    Ok(Json(MessageResponse {
        user: exchange.user,
        reply: exchange.reply,
        total_messages: session.store().len(),
    }))
}

/// POST /api/sessions/{id}/end
pub async fn end_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<EndResponse>, Response> {
    let handle = state.registry.get(&id).map_err(error_response)?;
    let mut session = handle.lock().await;

    let response = match state.coach.end_conversation(&mut session).await {
        Ok(record) => EndResponse {
            active: false,
            summary: Some(record.summary),
            path: Some(record.path.display().to_string()),
            warning: None,
        },
        Err(e) => {
            warn!(session_id = id.as_str(), error = %e, "summary unavailable");
            EndResponse {
                active: false,
                summary: None,
                path: None,
                warning: Some(warning_text(&e)),
            }
        }
    };
    Ok(Json(response))
}

/// POST /api/sessions/{id}/clear
pub async fn clear_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, Response> {
    let handle = state.registry.get(&id).map_err(error_response)?;
    let mut session = handle.lock().await;
    session.clear();
    Ok(Json(session.snapshot()))
}

// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use waypoint_core::WaypointError;
use waypoint_session::{Coach, SessionRegistry};

use crate::handlers;

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub coach: Arc<Coach>,
    pub registry: Arc<SessionRegistry>,
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(coach: Arc<Coach>, registry: Arc<SessionRegistry>) -> Self {
        Self {
            coach,
            registry,
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        }
    }
}

/// Gateway server configuration (mirrors `GatewayConfig` from waypoint-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the router:
/// - GET /, GET /health
/// - POST /api/sessions
/// - GET|DELETE /api/sessions/{id}
/// - POST /api/sessions/{id}/messages | /end | /clear
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::get_health))
        .route("/api/sessions", post(handlers::create_session))
        .route(
            "/api/sessions/{id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/api/sessions/{id}/messages", post(handlers::post_message))
        .route("/api/sessions/{id}/end", post(handlers::end_session))
        .route("/api/sessions/{id}/clear", post(handlers::clear_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds and serves until `cancel` fires.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), WaypointError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| WaypointError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    serve_listener(listener, state, cancel).await
}

/// Serves on an already bound listener until `cancel` fires.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve_listener(
    listener: tokio::net::TcpListener,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), WaypointError> {
    let app = build_router(state);
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Gateway server listening on http://{addr}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| WaypointError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8501,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
        assert!(debug.contains("8501"));
    }
}

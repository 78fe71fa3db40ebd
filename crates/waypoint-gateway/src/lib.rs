// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for Waypoint.
//!
//! Serves the single-page chat UI and a JSON session API. Each browser tab
//! creates a session, keeps its id, and drives it through
//! `/api/sessions/{id}/...`.

pub mod handlers;
pub mod server;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use waypoint_core::traits::PluginAdapter;
use waypoint_core::types::{AdapterType, HealthStatus};
use waypoint_core::WaypointError;

pub use crate::server::{
    build_router, serve_listener, start_server, GatewayState, HealthState, ServerConfig,
};

/// The gateway as a pluggable adapter.
///
/// [`Gateway::run`] serves until the token is cancelled; health reflects
/// whether the server is currently running.
pub struct Gateway {
    config: ServerConfig,
    state: GatewayState,
    running: Mutex<bool>,
}

impl Gateway {
    pub fn new(config: ServerConfig, state: GatewayState) -> Self {
        Self {
            config,
            state,
            running: Mutex::new(false),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serves requests until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), WaypointError> {
        *self.running.lock().await = true;
        let result = start_server(&self.config, self.state.clone(), cancel).await;
        *self.running.lock().await = false;
        result
    }
}

#[async_trait]
impl PluginAdapter for Gateway {
    fn name(&self) -> &str {
        "gateway"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, WaypointError> {
        if *self.running.lock().await {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Unhealthy("server not started".to_string()))
        }
    }
}

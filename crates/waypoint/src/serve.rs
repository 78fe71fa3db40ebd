// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `waypoint serve` command implementation.
//!
//! Resolves the coaching persona, constructs the OpenAI provider (a missing
//! key stops startup here, before the server binds), then runs the gateway
//! and the idle-session reaper until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use waypoint_config::WaypointConfig;
use waypoint_core::{PluginAdapter, WaypointError};
use waypoint_gateway::{Gateway, GatewayState, ServerConfig};
use waypoint_openai::OpenAiProvider;
use waypoint_session::{
    load_system_prompt, shutdown, spawn_reaper, Coach, PromptAssembler, SessionRegistry,
    SummaryWriter,
};

/// Runs the `waypoint serve` command.
pub async fn run_serve(config: WaypointConfig) -> Result<(), WaypointError> {
    init_tracing(&config.agent.log_level);

    info!(name = config.agent.name.as_str(), "starting waypoint serve");

    let persona = load_system_prompt(&config.agent).await;
    let provider = Arc::new(OpenAiProvider::new(&config, persona)?);
    info!(
        provider = provider.name(),
        model = provider.model(),
        "completion provider ready"
    );

    let coach = Arc::new(Coach::new(
        provider,
        PromptAssembler::new(config.agent.client_name.clone()),
        SummaryWriter::new(&config.summary.directory),
    ));
    let registry = Arc::new(SessionRegistry::new());

    let cancel = shutdown::install_signal_handler();

    let reaper = spawn_reaper(
        registry.clone(),
        Duration::from_secs(config.gateway.reap_interval_secs),
        Duration::from_secs(config.gateway.session_idle_timeout_secs),
        cancel.clone(),
    );

    let gateway = Gateway::new(
        ServerConfig {
            host: config.gateway.host.clone(),
            port: config.gateway.port,
        },
        GatewayState::new(coach, registry),
    );

    let result = gateway.run(cancel.clone()).await;

    // Stop background tasks whether the server exited cleanly or not.
    cancel.cancel();
    let _ = reaper.await;

    info!("waypoint serve shutdown complete");
    result
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("waypoint={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a [`Coach`] and a [`SessionRegistry`] around a
//! [`MockProvider`], with summaries written to a temp directory.

use std::path::Path;
use std::sync::Arc;

use waypoint_config::WaypointConfig;
use waypoint_core::types::SessionId;
use waypoint_core::{ProviderAdapter, WaypointError};
use waypoint_session::{
    Coach, Exchange, PromptAssembler, SessionRegistry, SummaryRecord, SummaryWriter,
};

use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    client_name: String,
    provider: Option<MockProvider>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            client_name: "Roger".to_string(),
            provider: None,
        }
    }

    /// Set mock provider replies.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Use a pre-built mock provider. Queued replies are appended to it.
    pub fn with_provider(mut self, provider: MockProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Build the test harness.
    pub async fn build(self) -> Result<TestHarness, WaypointError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| WaypointError::Storage { source: e.into() })?;

        let mock_provider = Arc::new(self.provider.unwrap_or_default());
        for response in self.responses {
            mock_provider.add_response(response).await;
        }

        let mut config = WaypointConfig::default();
        config.agent.client_name = self.client_name.clone();
        config.summary.directory = temp_dir
            .path()
            .join("summaries")
            .to_string_lossy()
            .into_owned();

        let coach = Arc::new(Coach::new(
            mock_provider.clone() as Arc<dyn ProviderAdapter + Send + Sync>,
            PromptAssembler::new(self.client_name),
            SummaryWriter::new(&config.summary.directory),
        ));

        Ok(TestHarness {
            mock_provider,
            coach,
            registry: Arc::new(SessionRegistry::new()),
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a mock provider and temp summary directory.
pub struct TestHarness {
    /// The mock LLM provider.
    pub mock_provider: Arc<MockProvider>,
    pub coach: Arc<Coach>,
    pub registry: Arc<SessionRegistry>,
    /// Config pointing at the temp summary directory.
    pub config: WaypointConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Registers a fresh session.
    pub fn new_session(&self) -> SessionId {
        self.registry.create().0
    }

    /// Submits `text` to the session through the coach.
    pub async fn send_message(
        &self,
        session_id: &SessionId,
        text: &str,
    ) -> Result<Exchange, WaypointError> {
        let handle = self.registry.get(&session_id.0)?;
        let mut session = handle.lock().await;
        self.coach.submit(&mut session, text).await
    }

    /// Ends the session and returns its summary.
    pub async fn end_session(&self, session_id: &SessionId) -> Result<SummaryRecord, WaypointError> {
        let handle = self.registry.get(&session_id.0)?;
        let mut session = handle.lock().await;
        self.coach.end_conversation(&mut session).await
    }

    pub fn summary_dir(&self) -> &Path {
        Path::new(&self.config.summary.directory)
    }
}

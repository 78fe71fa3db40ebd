// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI provider adapter for Waypoint.
//!
//! This crate implements [`ProviderAdapter`] on top of the OpenAI Responses
//! API. One call to [`ProviderAdapter::complete`] is one HTTP round trip.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use waypoint_config::WaypointConfig;
use waypoint_core::error::WaypointError;
use waypoint_core::traits::{PluginAdapter, ProviderAdapter};
use waypoint_core::types::{
    AdapterType, HealthStatus, ProviderRequest, ProviderResponse, TokenUsage,
};

use crate::client::OpenAiClient;
use crate::types::{InputMessage, ResponsesRequest};

/// OpenAI provider implementing [`ProviderAdapter`].
///
/// The API key comes from `openai.api_key`, which the config loader fills
/// from `OPENAI_API_KEY`. Construction fails when it is absent.
pub struct OpenAiProvider {
    client: OpenAiClient,
    instructions: String,
    max_output_tokens: u32,
    temperature: f32,
}

impl OpenAiProvider {
    /// Creates a provider from configuration and the resolved persona text.
    pub fn new(config: &WaypointConfig, instructions: String) -> Result<Self, WaypointError> {
        let api_key = resolve_api_key(&config.openai.api_key)?;

        let client = OpenAiClient::new(
            &api_key,
            config.openai.model.clone(),
            &config.openai.base_url,
            Duration::from_secs(config.openai.timeout_secs),
        )?;

        info!(
            model = config.openai.model.as_str(),
            base_url = config.openai.base_url.as_str(),
            "OpenAI provider initialized"
        );

        Ok(Self {
            client,
            instructions,
            max_output_tokens: config.openai.max_output_tokens,
            temperature: config.openai.temperature,
        })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: OpenAiClient, instructions: String) -> Self {
        Self {
            client,
            instructions,
            max_output_tokens: 1000,
            temperature: 0.7,
        }
    }

    /// Returns the model used for every request.
    pub fn model(&self) -> &str {
        self.client.default_model()
    }

    fn to_responses_request(&self, request: &ProviderRequest) -> ResponsesRequest {
        let input = request
            .input
            .iter()
            .map(|m| InputMessage {
                role: m.role.to_string(),
                content: m.content.clone(),
            })
            .collect();

        let instructions = request
            .instructions
            .clone()
            .unwrap_or_else(|| self.instructions.clone());

        ResponsesRequest {
            model: self.client.default_model().to_string(),
            instructions: (!instructions.is_empty()).then_some(instructions),
            input,
            max_output_tokens: request.max_output_tokens.unwrap_or(self.max_output_tokens),
            temperature: request.temperature.unwrap_or(self.temperature),
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, WaypointError> {
        // No API call here: health probes must not spend tokens.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, WaypointError> {
        let api_request = self.to_responses_request(&request);
        debug!(
            input_len = api_request.input.len(),
            model = api_request.model.as_str(),
            "sending completion request"
        );

        let response = self.client.create_response(&api_request).await?;

        if response.status.as_deref() == Some("failed") {
            let message = response
                .error
                .as_ref()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "response failed without detail".into());
            return Err(WaypointError::Provider {
                message: format!("OpenAI response failed: {message}"),
                source: None,
            });
        }

        if let Some(details) = &response.incomplete_details {
            warn!(
                reason = details.reason.as_deref().unwrap_or("unknown"),
                "response incomplete"
            );
        }

        let content = response
            .output_text()
            .ok_or_else(|| WaypointError::MalformedResponse {
                message: "response contained no output text".into(),
            })?;

        let usage = response
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            })
            .unwrap_or_default();

        debug!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "completion received"
        );

        Ok(ProviderResponse {
            id: response.id,
            content,
            model: response.model,
            usage,
        })
    }
}

/// Returns the configured key, or a credential error naming `OPENAI_API_KEY`.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, WaypointError> {
    match config_key {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(WaypointError::Config(
            "OPENAI_API_KEY environment variable is required".into(),
        )),
    }
}

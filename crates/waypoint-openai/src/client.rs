// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Responses API.
//!
//! [`OpenAiClient`] owns authentication and the request timeout. Failures
//! are returned as categorized [`WaypointError`]s and are never retried.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::debug;
use waypoint_core::WaypointError;

use crate::types::{ApiErrorResponse, ResponsesRequest, ResponsesResponse};

/// Default base URL for the OpenAI API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// HTTP client for OpenAI API communication.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    default_model: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAiClient {
    /// Creates a new client.
    ///
    /// Fails with [`WaypointError::Config`] when `api_key` is empty, before
    /// any network activity.
    pub fn new(
        api_key: &str,
        model: String,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, WaypointError> {
        if api_key.trim().is_empty() {
            return Err(WaypointError::Config(
                "OPENAI_API_KEY environment variable is required".into(),
            ));
        }
        if model.trim().is_empty() {
            return Err(WaypointError::Config("model identifier must not be empty".into()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|e| WaypointError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| WaypointError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            default_model: model,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Returns the default model identifier.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    /// Sends one `create response` request and returns the parsed body.
    pub async fn create_response(
        &self,
        request: &ResponsesRequest,
    ) -> Result<ResponsesResponse, WaypointError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(status = %status, model = request.model.as_str(), "response received");

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| WaypointError::MalformedResponse {
            message: format!("failed to parse API response: {e}"),
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> WaypointError {
        if e.is_timeout() {
            WaypointError::Timeout {
                duration: self.timeout,
            }
        } else {
            WaypointError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }
}

/// Maps a non-2xx status and body to an error category.
fn status_error(status: StatusCode, body: &str) -> WaypointError {
    let api_err = serde_json::from_str::<ApiErrorResponse>(body).ok();

    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return WaypointError::Auth {
            message: api_err
                .map(|e| e.error.message)
                .unwrap_or_else(|| format!("API returned {status}: invalid API key")),
        };
    }

    let message = match api_err {
        Some(api_err) => format!(
            "OpenAI API error ({}): {}",
            api_err.error.type_.as_deref().unwrap_or("unknown"),
            api_err.error.message
        ),
        None => format!("API returned {status}: {body}"),
    };
    WaypointError::Provider {
        message,
        source: None,
    }
}

// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Waypoint configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WaypointConfig {
    /// Coach persona and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Completion service settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// HTTP server and session lifecycle settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// End-of-session summary output.
    #[serde(default)]
    pub summary: SummaryConfig,
}

impl WaypointConfig {
    /// Returns a copy safe to print: the API key is replaced by a marker.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.openai.api_key.is_some() {
            copy.openai.api_key = Some(REDACTED.to_string());
        }
        copy
    }
}

const REDACTED: &str = "[redacted]";

/// Coach identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the service.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Name placed in the `<client_metadata>` block of every user turn.
    #[serde(default = "default_client_name")]
    pub client_name: String,

    /// Inline replacement for the built-in coaching persona.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Markdown file holding the persona. Wins over `system_prompt`.
    #[serde(default)]
    pub system_prompt_file: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            client_name: default_client_name(),
            system_prompt: None,
            system_prompt_file: None,
        }
    }
}

fn default_agent_name() -> String {
    "waypoint".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_client_name() -> String {
    "Roger".to_string()
}

/// Completion service configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. Usually supplied through `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier. Usually supplied through `OPENAI_MODEL`.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the API, without the `/responses` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Cap on generated tokens per reply.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_max_output_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    60
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Sessions untouched for this long are discarded.
    #[serde(default = "default_session_idle_timeout_secs")]
    pub session_idle_timeout_secs: u64,

    /// How often the idle-session reaper runs.
    #[serde(default = "default_reap_interval_secs")]
    pub reap_interval_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_idle_timeout_secs: default_session_idle_timeout_secs(),
            reap_interval_secs: default_reap_interval_secs(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_session_idle_timeout_secs() -> u64 {
    1800
}

fn default_reap_interval_secs() -> u64 {
    60
}

/// Summary file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryConfig {
    /// Directory that receives `career_coaching_summary_*.md` files.
    #[serde(default = "default_summary_directory")]
    pub directory: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            directory: default_summary_directory(),
        }
    }
}

fn default_summary_directory() -> String {
    "summaries".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = WaypointConfig::default();
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.openai.max_output_tokens, 1000);
        assert!((config.openai.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.gateway.port, 8501);
        assert_eq!(config.summary.directory, "summaries");
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = OpenAiConfig {
            api_key: Some("sk-secret-value".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret-value"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn redacted_copy_masks_key_only_when_present() {
        let mut config = WaypointConfig::default();
        assert!(config.redacted().openai.api_key.is_none());

        config.openai.api_key = Some("sk-secret-value".into());
        let redacted = config.redacted();
        assert_eq!(redacted.openai.api_key.as_deref(), Some("[redacted]"));
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-secret-value"));
    }
}

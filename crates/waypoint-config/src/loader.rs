// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./waypoint.toml` > `~/.config/waypoint/waypoint.toml` >
//! `/etc/waypoint/waypoint.toml`, then `WAYPOINT_*` variables, then the
//! conventional `OPENAI_API_KEY`, `OPENAI_MODEL` and `OPENAI_BASE_URL`.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::WaypointConfig;

/// Top-level config sections that `WAYPOINT_<SECTION>_<KEY>` may target.
const SECTIONS: &[&str] = &["agent", "openai", "gateway", "summary"];

/// Variables read without the `WAYPOINT_` prefix.
const OPENAI_VARS: &[&str] = &["OPENAI_API_KEY", "OPENAI_MODEL", "OPENAI_BASE_URL"];

/// Load configuration from the standard file hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/waypoint/waypoint.toml`
/// 3. `~/.config/waypoint/waypoint.toml`
/// 4. `./waypoint.toml`
/// 5. `WAYPOINT_*` environment variables
/// 6. `OPENAI_*` environment variables
pub fn load_config() -> Result<WaypointConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<WaypointConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WaypointConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(WaypointConfig::default()))
        .merge(Toml::file("/etc/waypoint/waypoint.toml"))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file("waypoint.toml"))
        .merge(prefixed_env())
        .merge(openai_env())
}

/// `~/.config/waypoint/waypoint.toml` on the current platform.
pub(crate) fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("waypoint/waypoint.toml"))
}

/// `WAYPOINT_OPENAI_MAX_OUTPUT_TOKENS` -> `openai.max_output_tokens`.
///
/// Only the first underscore after a known section becomes a dot, so
/// underscore-containing key names survive intact.
fn prefixed_env() -> Env {
    Env::prefixed("WAYPOINT_").map(|key| section_key(key.as_str()).into())
}

/// `OPENAI_API_KEY` -> `openai.api_key`, and likewise for the model and base URL.
fn openai_env() -> Env {
    Env::raw()
        .only(OPENAI_VARS)
        .map(|key| section_key(key.as_str()).into())
}

pub(crate) fn section_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_key_splits_only_after_section() {
        assert_eq!(section_key("openai_api_key"), "openai.api_key");
        assert_eq!(
            section_key("gateway_session_idle_timeout_secs"),
            "gateway.session_idle_timeout_secs"
        );
        assert_eq!(section_key("agent_log_level"), "agent.log_level");
        assert_eq!(section_key("summary_directory"), "summary.directory");
    }

    #[test]
    fn section_key_leaves_unknown_sections_alone() {
        assert_eq!(section_key("telemetry_enabled"), "telemetry_enabled");
    }

    #[test]
    fn openai_env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("waypoint.toml", "[openai]\nmodel = \"from-file\"\n")?;
            jail.set_env("OPENAI_MODEL", "from-env");
            jail.set_env("OPENAI_API_KEY", "sk-env");

            let config = load_config()?;
            assert_eq!(config.openai.model, "from-env");
            assert_eq!(config.openai.api_key.as_deref(), Some("sk-env"));
            Ok(())
        });
    }

    #[test]
    fn prefixed_env_maps_into_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WAYPOINT_GATEWAY_PORT", "9000");
            jail.set_env("WAYPOINT_AGENT_CLIENT_NAME", "Dana");

            let config = load_config()?;
            assert_eq!(config.gateway.port, 9000);
            assert_eq!(config.agent.client_name, "Dana");
            Ok(())
        });
    }
}

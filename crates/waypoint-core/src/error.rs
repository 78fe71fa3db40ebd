// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared across the Waypoint crates.

use thiserror::Error;

/// The primary error type used by Waypoint adapters and the conversation layer.
#[derive(Debug, Error)]
pub enum WaypointError {
    /// Configuration errors (missing credential, invalid header value, bad settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// The completion service rejected our credential.
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// Transport or API failures talking to the completion service.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The completion service answered with a body we could not use.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Filesystem errors while writing session artifacts.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A user submission with no content.
    #[error("message content must not be empty")]
    EmptyMessage,

    /// The session has ended and no longer accepts input.
    #[error("conversation has ended")]
    SessionInactive,

    /// No live session with this identifier.
    #[error("session not found: {id}")]
    SessionNotFound { id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WaypointError {
    /// Returns true for failures caused by a missing or rejected API key.
    pub fn is_credential_error(&self) -> bool {
        match self {
            WaypointError::Auth { .. } => true,
            other => {
                let text = other.to_string();
                text.to_lowercase().contains("api key") || text.contains("OPENAI_API_KEY")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_is_always_a_credential_error() {
        let err = WaypointError::Auth {
            message: "401 Unauthorized".into(),
        };
        assert!(err.is_credential_error());
    }

    #[test]
    fn provider_message_mentioning_api_key_is_credential_error() {
        let err = WaypointError::Provider {
            message: "Incorrect API key provided".into(),
            source: None,
        };
        assert!(err.is_credential_error());

        let err = WaypointError::Config("OPENAI_API_KEY is not set".into());
        assert!(err.is_credential_error());
    }

    #[test]
    fn unrelated_failures_are_not_credential_errors() {
        let err = WaypointError::Timeout {
            duration: std::time::Duration::from_secs(60),
        };
        assert!(!err.is_credential_error());

        let err = WaypointError::Provider {
            message: "connection refused".into(),
            source: None,
        };
        assert!(!err.is_credential_error());
    }
}

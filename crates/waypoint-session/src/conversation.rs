// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation orchestration.
//!
//! [`Coach`] drives one user action end to end: validate the input, build
//! the request from history, make exactly one provider call, and record the
//! outcome in the session. Provider failures become warning turns here.

use std::sync::Arc;

use tracing::{debug, info, warn};
use waypoint_core::types::{ChatMessage, ProviderRequest, Role};
use waypoint_core::{ProviderAdapter, WaypointError};

use crate::prompt::PromptAssembler;
use crate::session::Session;
use crate::store::Turn;
use crate::summary::{extract_summary, SummaryRecord, SummaryWriter};

/// Warning shown when the API key is missing or rejected.
pub const MISSING_KEY_WARNING: &str =
    "⚠️ OpenAI API key not configured. Please set your OPENAI_API_KEY environment variable.";

/// Renders a provider failure as the text of an inline warning turn.
pub fn warning_text(err: &WaypointError) -> String {
    if err.is_credential_error() {
        MISSING_KEY_WARNING.to_string()
    } else {
        format!("⚠️ Sorry, I encountered an error: {err}. Please try again.")
    }
}

/// Turns created by one submission.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user: Turn,
    pub reply: Turn,
}

impl Exchange {
    /// True when the reply reports a failure instead of model output.
    pub fn is_warning(&self) -> bool {
        self.reply.warning
    }
}

pub struct Coach {
    provider: Arc<dyn ProviderAdapter + Send + Sync>,
    assembler: PromptAssembler,
    writer: SummaryWriter,
}

impl Coach {
    pub fn new(
        provider: Arc<dyn ProviderAdapter + Send + Sync>,
        assembler: PromptAssembler,
        writer: SummaryWriter,
    ) -> Self {
        Self {
            provider,
            assembler,
            writer,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn provider(&self) -> &Arc<dyn ProviderAdapter + Send + Sync> {
        &self.provider
    }

    /// One provider round trip returning the reply text.
    pub async fn get_reply(&self, input: Vec<ChatMessage>) -> Result<String, WaypointError> {
        let response = self.provider.complete(ProviderRequest::new(input)).await?;
        debug!(
            model = response.model.as_str(),
            output_tokens = response.usage.output_tokens,
            "reply received"
        );
        Ok(response.content)
    }

    /// Handles a user submission.
    ///
    /// Rejects empty text and ended sessions without touching the store.
    /// Otherwise appends the user turn and then either the reply or a
    /// warning turn; provider failures are not returned as errors.
    pub async fn submit(
        &self,
        session: &mut Session,
        text: &str,
    ) -> Result<Exchange, WaypointError> {
        if text.trim().is_empty() {
            return Err(WaypointError::EmptyMessage);
        }
        if !session.is_active() {
            return Err(WaypointError::SessionInactive);
        }
        session.touch();

        let payload = self
            .assembler
            .build_chat_payload(session.store().all(), text);
        let user = session.store_mut().append(Role::User, text);

        let reply = match self.get_reply(payload).await {
            Ok(content) => session.store_mut().append(Role::Assistant, content),
            Err(e) => {
                warn!(session_id = %session.id(), error = %e, "completion failed");
                session.store_mut().append_warning(warning_text(&e))
            }
        };
        session.touch();

        Ok(Exchange { user, reply })
    }

    /// Ends the session and produces its summary.
    ///
    /// The summary is generated at most once per session. A stored result is
    /// returned as is. When the model call fails nothing is kept and a later
    /// call asks again; when only the file write fails the generated text is
    /// kept and a later call just retries the write.
    pub async fn end_conversation(
        &self,
        session: &mut Session,
    ) -> Result<SummaryRecord, WaypointError> {
        session.end();
        session.touch();

        if let Some(existing) = session.summary() {
            return Ok(existing.clone());
        }

        let summary = match session.pending_summary().map(str::to_string) {
            Some(pending) => pending,
            None => {
                let payload = self.assembler.build_summary_payload(session.store().all());
                let raw = self.get_reply(payload).await.inspect_err(|e| {
                    warn!(session_id = %session.id(), error = %e, "summary generation failed");
                })?;
                let summary = extract_summary(&raw);
                session.set_pending_summary(summary.clone());
                summary
            }
        };

        let path = self.writer.write(&summary).await.inspect_err(|e| {
            warn!(session_id = %session.id(), error = %e, "summary write failed");
        })?;
        info!(session_id = %session.id(), path = %path.display(), "conversation ended");

        let record = SummaryRecord { summary, path };
        session.set_summary(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn api_key_message_gets_fixed_warning() {
        let err = WaypointError::Provider {
            message: "Incorrect API key provided".into(),
            source: None,
        };
        assert_eq!(warning_text(&err), MISSING_KEY_WARNING);
    }

    #[test]
    fn env_var_name_gets_fixed_warning() {
        let err = WaypointError::Config("OPENAI_API_KEY environment variable is required".into());
        assert_eq!(warning_text(&err), MISSING_KEY_WARNING);
    }

    #[test]
    fn auth_failure_gets_fixed_warning() {
        let err = WaypointError::Auth {
            message: "401".into(),
        };
        assert_eq!(warning_text(&err), MISSING_KEY_WARNING);
    }

    #[test]
    fn other_failures_include_detail() {
        let err = WaypointError::Provider {
            message: "X".into(),
            source: None,
        };
        let text = warning_text(&err);
        assert!(text.starts_with("⚠️ Sorry, I encountered an error: "));
        assert!(text.contains('X'));
        assert!(text.ends_with(". Please try again."));

        let timeout = warning_text(&WaypointError::Timeout {
            duration: Duration::from_secs(60),
        });
        assert!(timeout.contains("timed out"), "got: {timeout}");
    }
}

// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly for chat and summary requests.
//!
//! Loads the coaching persona from config and turns session history into
//! the ordered `{role, content}` input the completion service expects.

use tracing::info;
use waypoint_config::model::AgentConfig;
use waypoint_core::types::ChatMessage;

use crate::store::Turn;

/// Built-in coaching persona, sent as out-of-band instructions.
pub const DEFAULT_SYSTEM_PROMPT: &str = include_str!("../prompts/coach.md");

/// Final user instruction of a summary request.
pub const SUMMARY_INSTRUCTION: &str = include_str!("../prompts/summary.md");

/// Opening assistant turn of every fresh session.
pub const INTRO_MESSAGE: &str = "Hello! I'm an AI professional coach. I can help you navigate career \
transitions—whether you're thinking about changing industries, seeking a promotion, or exploring a \
new professional path altogether.\n\nTo kick things off, could you share what brings you here today? \
We'll go step by step to find clarity and next steps. Looking forward to supporting you!";

/// Loads the system prompt following config priority: file > inline > default.
pub async fn load_system_prompt(config: &AgentConfig) -> String {
    if let Some(ref file_path) = config.system_prompt_file {
        match tokio::fs::read_to_string(file_path).await {
            Ok(content) => {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    info!(path = file_path.as_str(), "loaded system prompt from file");
                    return trimmed.to_string();
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = file_path.as_str(),
                    error = %e,
                    "failed to read system prompt file, falling back"
                );
            }
        }
    }

    if let Some(prompt) = config.system_prompt.as_deref().filter(|p| !p.trim().is_empty()) {
        return prompt.to_string();
    }

    DEFAULT_SYSTEM_PROMPT.trim().to_string()
}

/// Builds request inputs from session history.
///
/// Both builders are pure: they read the history and return a fresh vector.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    client_name: String,
}

impl PromptAssembler {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }

    /// Wraps a user submission with the client metadata block.
    pub fn client_message(&self, text: &str) -> String {
        format!(
            "\n<client_metadata>\nname: {}\n</client_metadata>\n\n{}\n",
            self.client_name, text
        )
    }

    /// History followed by the templated new user message.
    pub fn build_chat_payload(&self, history: &[Turn], new_user_text: &str) -> Vec<ChatMessage> {
        let mut input = map_history(history);
        input.push(ChatMessage::user(self.client_message(new_user_text)));
        input
    }

    /// History followed by the fixed summary instruction.
    pub fn build_summary_payload(&self, history: &[Turn]) -> Vec<ChatMessage> {
        let mut input = map_history(history);
        input.push(ChatMessage::user(SUMMARY_INSTRUCTION.trim()));
        input
    }
}

fn map_history(history: &[Turn]) -> Vec<ChatMessage> {
    let mut input = Vec::with_capacity(history.len() + 1);
    input.extend(history.iter().map(Turn::to_chat_message));
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MessageStore;
    use waypoint_core::types::Role;

    fn sample_history() -> MessageStore {
        let mut store = MessageStore::new();
        store.append(Role::Assistant, INTRO_MESSAGE);
        store.append(Role::User, "I'm a teacher");
        store.append(Role::Assistant, "What draws you to change?");
        store
    }

    #[test]
    fn chat_payload_appends_templated_user_turn() {
        let store = sample_history();
        let assembler = PromptAssembler::new("Roger");
        let payload = assembler.build_chat_payload(store.all(), "I want a new job");

        assert_eq!(payload.len(), store.len() + 1);
        for (msg, turn) in payload.iter().zip(store.all()) {
            assert_eq!(msg.role, turn.role);
            assert_eq!(msg.content, turn.content);
        }
        let last = payload.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(
            last.content,
            "\n<client_metadata>\nname: Roger\n</client_metadata>\n\nI want a new job\n"
        );
    }

    #[test]
    fn chat_payload_on_empty_history() {
        let payload = PromptAssembler::new("Ada").build_chat_payload(&[], "hello");
        assert_eq!(payload.len(), 1);
        assert!(payload[0].content.contains("name: Ada"));
        assert!(payload[0].content.contains("hello"));
    }

    #[test]
    fn summary_payload_ends_with_instruction() {
        let store = sample_history();
        let payload = PromptAssembler::new("Roger").build_summary_payload(store.all());
        assert_eq!(payload.len(), store.len() + 1);
        let last = payload.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert!(last.content.contains("<text>"));
        assert!(last.content.contains("</text>"));
    }

    #[test]
    fn history_is_not_mutated() {
        let store = sample_history();
        let before = store.all().to_vec();
        let _ = PromptAssembler::new("Roger").build_chat_payload(store.all(), "x");
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn default_persona_describes_phases() {
        assert!(DEFAULT_SYSTEM_PROMPT.contains("Phase 0: Introduction"));
        assert!(DEFAULT_SYSTEM_PROMPT.contains("Phase 4: Wrap Up"));
    }

    #[tokio::test]
    async fn load_system_prompt_default() {
        let prompt = load_system_prompt(&AgentConfig::default()).await;
        assert_eq!(prompt, DEFAULT_SYSTEM_PROMPT.trim());
    }

    #[tokio::test]
    async fn load_system_prompt_inline() {
        let config = AgentConfig {
            system_prompt: Some("Custom inline prompt.".to_string()),
            ..Default::default()
        };
        assert_eq!(load_system_prompt(&config).await, "Custom inline prompt.");
    }

    #[tokio::test]
    async fn load_system_prompt_blank_inline_uses_default() {
        let config = AgentConfig {
            system_prompt: Some("  \n".to_string()),
            ..Default::default()
        };
        assert_eq!(load_system_prompt(&config).await, DEFAULT_SYSTEM_PROMPT.trim());
    }

    #[tokio::test]
    async fn load_system_prompt_file_overrides_inline() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("persona.md");
        std::fs::write(&file_path, "  File-based prompt.\n").unwrap();

        let config = AgentConfig {
            system_prompt: Some("Inline prompt.".to_string()),
            system_prompt_file: Some(file_path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        assert_eq!(load_system_prompt(&config).await, "File-based prompt.");
    }

    #[tokio::test]
    async fn load_system_prompt_missing_file_falls_back() {
        let config = AgentConfig {
            system_prompt: Some("Fallback prompt.".to_string()),
            system_prompt_file: Some("/nonexistent/path/prompt.md".to_string()),
            ..Default::default()
        };
        assert_eq!(load_system_prompt(&config).await, "Fallback prompt.");
    }
}

// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered, append-only message history for one session.

use serde::Serialize;
use waypoint_core::types::{ChatMessage, Role};

/// Display format for turn timestamps.
const TIMESTAMP_FORMAT: &str = "%H:%M";

/// One immutable chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub sequence_id: u64,
    pub role: Role,
    pub content: String,
    /// Local wall-clock time of creation, `HH:MM`.
    pub timestamp: String,
    /// Set on assistant turns that report a backend failure instead of a reply.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub warning: bool,
}

impl Turn {
    /// Wire form for the completion service.
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// In-memory turn list with a monotonically increasing sequence counter.
#[derive(Debug, Default)]
pub struct MessageStore {
    turns: Vec<Turn>,
    next_id: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn and returns a copy of it.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Turn {
        self.push(role, content.into(), false)
    }

    /// Appends an assistant turn flagged as a warning.
    pub fn append_warning(&mut self, content: impl Into<String>) -> Turn {
        self.push(Role::Assistant, content.into(), true)
    }

    fn push(&mut self, role: Role, content: String, warning: bool) -> Turn {
        let turn = Turn {
            sequence_id: self.next_id,
            role,
            content,
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            warning,
        };
        self.next_id += 1;
        self.turns.push(turn.clone());
        turn
    }

    /// Full history in creation order.
    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    /// Drops every turn and restarts numbering at zero.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.next_id = 0;
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn append_assigns_ids_from_zero() {
        let mut store = MessageStore::new();
        let a = store.append(Role::User, "hi");
        let b = store.append(Role::Assistant, "hello");
        assert_eq!(a.sequence_id, 0);
        assert_eq!(b.sequence_id, 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.last().map(|t| t.content.as_str()), Some("hello"));
    }

    #[test]
    fn timestamp_is_hours_and_minutes() {
        let mut store = MessageStore::new();
        let turn = store.append(Role::User, "x");
        let bytes = turn.timestamp.as_bytes();
        assert_eq!(bytes.len(), 5, "got: {}", turn.timestamp);
        assert_eq!(bytes[2], b':');
        assert!(turn.timestamp.chars().filter(|c| *c != ':').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn clear_resets_counter() {
        let mut store = MessageStore::new();
        store.append(Role::User, "one");
        store.append(Role::Assistant, "two");
        store.clear();
        assert!(store.all().is_empty());
        assert!(store.is_empty());
        assert!(store.last().is_none());
        assert_eq!(store.append(Role::User, "again").sequence_id, 0);
    }

    #[test]
    fn warning_turns_are_flagged_assistant_turns() {
        let mut store = MessageStore::new();
        let turn = store.append_warning("⚠️ nope");
        assert_eq!(turn.role, Role::Assistant);
        assert!(turn.warning);
        assert!(!store.append(Role::User, "ok").warning);
    }

    #[test]
    fn warning_flag_omitted_from_json_when_false() {
        let mut store = MessageStore::new();
        let json = serde_json::to_value(store.append(Role::User, "hi")).unwrap();
        assert!(json.get("warning").is_none());
        assert_eq!(json["role"], "user");
        let json = serde_json::to_value(store.append_warning("w")).unwrap();
        assert_eq!(json["warning"], true);
    }

    proptest! {
        #[test]
        fn history_preserves_append_order(contents in proptest::collection::vec(".{0,40}", 0..50)) {
            let mut store = MessageStore::new();
            for (i, content) in contents.iter().enumerate() {
                let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
                store.append(role, content.clone());
            }

            let all = store.all();
            prop_assert_eq!(all.len(), contents.len());
            for (i, (turn, content)) in all.iter().zip(&contents).enumerate() {
                prop_assert_eq!(turn.sequence_id, i as u64);
                prop_assert_eq!(&turn.content, content);
            }
        }
    }
}

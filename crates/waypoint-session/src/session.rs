// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A single browser conversation.
//!
//! A session owns its [`MessageStore`], an `active` flag and the summary
//! produced when it ends. It starts with the introductory assistant turn.

use std::time::Instant;

use serde::Serialize;
use waypoint_core::types::{Role, SessionId};

use crate::prompt::INTRO_MESSAGE;
use crate::store::{MessageStore, Turn};
use crate::summary::SummaryRecord;

/// States a session moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting user input.
    Active,
    /// Finished; only the one-time summary may still run.
    Ended,
}

#[derive(Debug)]
pub struct Session {
    id: SessionId,
    store: MessageStore,
    state: SessionState,
    summary: Option<SummaryRecord>,
    /// Summary text generated but not yet written to disk.
    pending_summary: Option<String>,
    last_activity: Instant,
}

impl Session {
    /// Creates an active session seeded with the intro turn.
    pub fn new(id: SessionId) -> Self {
        let mut store = MessageStore::new();
        store.append(Role::Assistant, INTRO_MESSAGE);
        Self {
            id,
            store,
            state: SessionState::Active,
            summary: None,
            pending_summary: None,
            last_activity: Instant::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut MessageStore {
        &mut self.store
    }

    /// Marks the session ended. Idempotent.
    pub fn end(&mut self) {
        self.state = SessionState::Ended;
    }

    /// Empties the history. The active flag is left alone.
    pub fn clear(&mut self) {
        self.store.clear();
        self.touch();
    }

    pub fn summary(&self) -> Option<&SummaryRecord> {
        self.summary.as_ref()
    }

    pub(crate) fn set_summary(&mut self, record: SummaryRecord) {
        self.pending_summary = None;
        self.summary = Some(record);
    }

    pub(crate) fn pending_summary(&self) -> Option<&str> {
        self.pending_summary.as_deref()
    }

    pub(crate) fn set_pending_summary(&mut self, summary: String) {
        self.pending_summary = Some(summary);
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    /// Read-only view for presentation.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.to_string(),
            active: self.is_active(),
            turns: self.store.all().to_vec(),
            total_messages: self.store.len(),
            last_message_at: self.store.last().map(|t| t.timestamp.clone()),
            summary: self.summary.clone(),
        }
    }
}

/// Serializable view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub active: bool,
    pub turns: Vec<Turn>,
    pub total_messages: usize,
    pub last_message_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SessionId("s-1".into()))
    }

    #[test]
    fn new_session_is_seeded_with_intro() {
        let s = session();
        assert!(s.is_active());
        assert_eq!(s.store().len(), 1);
        let intro = &s.store().all()[0];
        assert_eq!(intro.role, Role::Assistant);
        assert_eq!(intro.sequence_id, 0);
        assert!(intro.content.starts_with("Hello! I'm an AI professional coach."));
    }

    #[test]
    fn end_is_idempotent() {
        let mut s = session();
        s.end();
        s.end();
        assert_eq!(s.state, SessionState::Ended);
        assert!(!s.is_active());
    }

    #[test]
    fn clear_keeps_state() {
        let mut s = session();
        s.end();
        s.clear();
        assert!(s.store().is_empty());
        assert_eq!(s.state, SessionState::Ended);
    }

    #[test]
    fn snapshot_reports_statistics() {
        let mut s = session();
        s.store_mut().append(Role::User, "hi");
        let snap = s.snapshot();
        assert_eq!(snap.id, "s-1");
        assert_eq!(snap.total_messages, 2);
        assert_eq!(snap.turns.len(), 2);
        assert_eq!(snap.last_message_at, Some(snap.turns[1].timestamp.clone()));
        assert!(snap.summary.is_none());

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["active"], true);
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn stored_summary_clears_pending_text() {
        let mut s = session();
        s.set_pending_summary("draft".into());
        assert_eq!(s.pending_summary(), Some("draft"));

        s.set_summary(SummaryRecord {
            summary: "draft".into(),
            path: "summaries/x.md".into(),
        });
        assert!(s.pending_summary().is_none());
        assert_eq!(s.summary().unwrap().summary, "draft");
    }
}

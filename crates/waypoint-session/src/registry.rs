// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live sessions keyed by id.
//!
//! Each session sits behind its own async mutex, held for the whole of a
//! provider call, so one session never has two turns in flight.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use waypoint_core::types::SessionId;
use waypoint_core::WaypointError;

use crate::session::Session;

pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, SessionHandle>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and registers a fresh session.
    pub fn create(&self) -> (SessionId, SessionHandle) {
        let id = SessionId(uuid::Uuid::new_v4().to_string());
        let handle = Arc::new(Mutex::new(Session::new(id.clone())));
        self.sessions.insert(id.0.clone(), handle.clone());
        info!(session_id = %id, "session created");
        (id, handle)
    }

    pub fn get(&self, id: &str) -> Result<SessionHandle, WaypointError> {
        self.sessions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| WaypointError::SessionNotFound { id: id.to_string() })
    }

    /// Discards a session. Returns false if it was not registered.
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            info!(session_id = id, "session removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Removes sessions idle for longer than `max_idle`.
    ///
    /// A session whose lock is held has a call in flight and is kept.
    pub fn reap_idle(&self, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => session.last_activity().elapsed() <= max_idle,
            Err(_) => true,
        });
        let reaped = before.saturating_sub(self.sessions.len());
        if reaped > 0 {
            info!(reaped, remaining = self.sessions.len(), "reaped idle sessions");
        }
        reaped
    }
}

/// Spawns the periodic idle-session reaper.
pub fn spawn_reaper(
    registry: Arc<SessionRegistry>,
    interval: Duration,
    max_idle: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Skip the first immediate tick.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let reaped = registry.reap_idle(max_idle);
                    debug!(reaped, active = registry.len(), "reaper pass");
                }
                _ = cancel.cancelled() => {
                    info!("session reaper shutting down");
                    break;
                }
            }
        }
    })
}

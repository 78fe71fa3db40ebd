// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation sessions for Waypoint.
//!
//! - [`store`]: ordered, append-only turn history
//! - [`prompt`]: persona loading and request assembly
//! - [`conversation`]: the [`Coach`] that runs submissions and summaries
//! - [`registry`]: concurrent session map with idle reaping
//! - [`shutdown`]: signal handling

pub mod conversation;
pub mod prompt;
pub mod registry;
pub mod session;
pub mod shutdown;
pub mod store;
pub mod summary;

pub use conversation::{warning_text, Coach, Exchange, MISSING_KEY_WARNING};
pub use prompt::{load_system_prompt, PromptAssembler, DEFAULT_SYSTEM_PROMPT, INTRO_MESSAGE};
pub use registry::{spawn_reaper, SessionHandle, SessionRegistry};
pub use session::{Session, SessionSnapshot};
pub use store::{MessageStore, Turn};
pub use summary::{extract_summary, SummaryRecord, SummaryWriter};

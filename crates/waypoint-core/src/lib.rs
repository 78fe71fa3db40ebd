// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Waypoint.
//!
//! This crate provides the trait definitions, error type, and common types
//! shared by the provider adapter, the conversation layer, and the gateway.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::WaypointError;
pub use traits::{PluginAdapter, ProviderAdapter};
pub use types::{
    AdapterType, ChatMessage, HealthStatus, ProviderRequest, ProviderResponse, Role, SessionId,
    TokenUsage,
};

// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for chat-completion services.

use async_trait::async_trait;

use crate::error::WaypointError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ProviderRequest, ProviderResponse};

/// Adapter for a remote chat-completion service.
///
/// Implementations are stateless between calls: every request carries the
/// full ordered history. Failures come back as typed errors; deciding how
/// to show them to a user is left to the caller.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends one completion request and returns the full response.
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> Result<ProviderResponse, WaypointError>;
}

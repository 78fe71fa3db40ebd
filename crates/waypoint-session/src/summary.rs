// SPDX-FileCopyrightText: 2026 Waypoint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-of-session summaries: delimiter stripping and markdown files.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;
use waypoint_core::WaypointError;

const OPEN_TAG: &str = "<text>";
const CLOSE_TAG: &str = "</text>";

/// Returns the content of the first `<text>...</text>` pair, trimmed.
///
/// Replies without a complete pair are used whole.
pub fn extract_summary(raw: &str) -> String {
    if let Some(start) = raw.find(OPEN_TAG) {
        let body = &raw[start + OPEN_TAG.len()..];
        if let Some(end) = body.find(CLOSE_TAG) {
            return body[..end].trim().to_string();
        }
    }
    raw.trim().to_string()
}

/// `career_coaching_summary_<YYYYMMDD_HHMMSS>.md`
pub fn summary_file_name(at: DateTime<Local>) -> String {
    format!("career_coaching_summary_{}.md", at.format("%Y%m%d_%H%M%S"))
}

/// A written summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRecord {
    pub summary: String,
    pub path: PathBuf,
}

/// Writes summaries into one directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct SummaryWriter {
    dir: PathBuf,
}

impl SummaryWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes `summary` to a timestamped file and returns its path.
    pub async fn write(&self, summary: &str) -> Result<PathBuf, WaypointError> {
        self.write_at(summary, Local::now()).await
    }

    pub(crate) async fn write_at(
        &self,
        summary: &str,
        at: DateTime<Local>,
    ) -> Result<PathBuf, WaypointError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| WaypointError::Storage { source: e.into() })?;

        let path = self.dir.join(summary_file_name(at));
        tokio::fs::write(&path, summary.as_bytes())
            .await
            .map_err(|e| WaypointError::Storage { source: e.into() })?;

        info!(path = %path.display(), bytes = summary.len(), "summary written");
        Ok(path)
    }
}

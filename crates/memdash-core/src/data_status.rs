//! One-shot readiness probe for the analysis data artifact.

use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Presence, size and modification time of the data artifact.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DataStatus {
    /// Whether the file exists.
    pub exists: bool,
    /// Size in bytes, `0` when absent.
    pub size_bytes: u64,
    /// Last modification time, if the file exists and the platform reports it.
    pub modified_at: Option<DateTime<Local>>,
}

impl DataStatus {
    /// Stat `path` once. Any error (including permission errors) reads as absent.
    pub fn probe(path: &Path) -> Self {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => Self {
                exists: true,
                size_bytes: meta.len(),
                modified_at: meta.modified().ok().map(DateTime::<Local>::from),
            },
            Ok(_) => Self::default(),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "data artifact not available");
                Self::default()
            }
        }
    }

    /// Size in KiB, for display.
    #[allow(clippy::cast_precision_loss)]
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

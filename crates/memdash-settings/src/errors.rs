//! Settings errors.
//!
//! File errors carry the settings path, since it may come from
//! `MEMDASH_SETTINGS` rather than the working directory.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to produce a usable [`crate::DashboardSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("cannot read settings file {}", .path.display())]
    Read {
        /// Settings file.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },

    /// The settings file is not JSON, or does not fit the settings shape.
    #[error("malformed settings file {}", .path.display())]
    Parse {
        /// Settings file.
        path: PathBuf,
        /// Underlying JSON error, with line and column.
        #[source]
        source: serde_json::Error,
    },

    /// A merged value failed validation.
    #[error("invalid setting: {0}")]
    InvalidValue(String),
}

impl SettingsError {
    /// Settings file involved, if the error came from reading one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => Some(path),
            Self::InvalidValue(_) => None,
        }
    }
}

/// Result alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

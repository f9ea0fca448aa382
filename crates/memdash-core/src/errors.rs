//! Error taxonomy for the dashboard server.
//!
//! Every variant of [`DashboardError`] is a startup failure that the binary
//! turns into a message on stderr and exit status 1. Per-request failures never
//! appear here: the static file service answers them with a status code.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while preparing or starting the server.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The static root directory does not exist.
    #[error("dashboard directory not found: {}", .0.display())]
    MissingRoot(PathBuf),

    /// No port in the probed range could be bound.
    #[error("no available ports found in range {start}..{end}")]
    PortExhausted {
        /// First port probed.
        start: u16,
        /// One past the last port probed.
        end: u32,
    },

    /// The listener could not be bound, typically because the probed port was
    /// claimed by another process in the meantime.
    #[error("failed to bind {addr}")]
    Bind {
        /// Address that was requested.
        addr: String,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },

    /// The serve loop terminated with an I/O error.
    #[error("server error")]
    Serve(#[source] io::Error),

    /// The landing page could not be written.
    #[error("failed to write landing page {}", .path.display())]
    IndexPage {
        /// Path that was being written.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
}

impl DashboardError {
    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::MissingRoot(_) => "configuration",
            Self::PortExhausted { .. } => "port_exhausted",
            Self::Bind { .. } => "bind",
            Self::Serve(_) => "serve",
            Self::IndexPage { .. } => "index_page",
        }
    }

    /// Operator hint printed under the error message, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingRoot(_) => {
                Some("Make sure you're running from the project root, or pass --root <dir>.")
            }
            Self::Bind { .. } => Some("The port may have been taken just now; re-run to pick another."),
            Self::PortExhausted { .. } => Some("Free a port or pass a different --port."),
            Self::Serve(_) | Self::IndexPage { .. } => None,
        }
    }
}

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

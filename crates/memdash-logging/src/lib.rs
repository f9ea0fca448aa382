//! # memdash-logging
//!
//! Installs the process-wide `tracing` subscriber.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from the configured
//! level. Output is either human-readable text or one JSON object per line.

#![deny(unsafe_code)]

use memdash_settings::{LogFormat, LoggingSettings};
use tracing_subscriber::EnvFilter;

/// Filter directive used when neither `RUST_LOG` nor the configured level parse.
pub const FALLBACK_FILTER: &str = "info";

/// Target used for per-request access log events.
pub const ACCESS_TARGET: &str = "memdash::access";

/// Build the env filter: `RUST_LOG` wins, then `level`, then [`FALLBACK_FILTER`].
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_from_level(level))
}

/// Parse a directive string, falling back to [`FALLBACK_FILTER`] when invalid.
pub fn filter_from_level(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|e| {
        eprintln!("memdash-logging: invalid log level {level:?} ({e}), using {FALLBACK_FILTER}");
        EnvFilter::new(FALLBACK_FILTER)
    })
}

/// Install the global subscriber. Call once at startup.
///
/// Returns `false` if a subscriber was already installed, in which case the
/// existing one stays in place.
pub fn init_subscriber(settings: &LoggingSettings) -> bool {
    let filter = build_filter(&settings.level);
    let installed = match settings.format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .is_ok(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(false)
            .try_init()
            .is_ok(),
    };
    if installed {
        tracing::debug!(level = %settings.level, format = ?settings.format, "logging initialised");
    }
    installed
}

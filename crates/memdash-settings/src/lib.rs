//! # memdash-settings
//!
//! Configuration with layered sources for the memdash server.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`DashboardSettings::default()`]
//! 2. **Settings file**: `memdash.json` in the working directory, or the file
//!    named by `MEMDASH_SETTINGS` (deep-merged over defaults)
//! 3. **Environment variables**: `MEMDASH_*` overrides (highest priority)
//!
//! Command-line flags are applied on top by the binary. The result is read
//! once at startup and never consulted again.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, apply_overrides_from, deep_merge, load_settings,
    load_settings_from_path, settings_path,
};
pub use types::{DashboardSettings, LogFormat, LoggingSettings, ServerSettings};

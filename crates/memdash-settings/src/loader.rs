//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`DashboardSettings::default()`]
//! 2. If the settings file exists, deep-merge its values over the defaults
//! 3. Apply `MEMDASH_*` environment overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::{DashboardSettings, LogFormat};

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "memdash.json";

/// Environment variable naming an alternative settings file.
pub const SETTINGS_ENV: &str = "MEMDASH_SETTINGS";

/// Resolve the settings file path: `$MEMDASH_SETTINGS`, else `./memdash.json`.
pub fn settings_path() -> PathBuf {
    std::env::var(SETTINGS_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from(SETTINGS_FILE), PathBuf::from)
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<DashboardSettings> {
    let mut settings = load_settings_from_path(&settings_path())?;
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

/// Load settings from a specific path, without env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<DashboardSettings> {
    let defaults = serde_json::to_value(DashboardSettings::default())
        .map_err(|e| SettingsError::InvalidValue(format!("defaults do not serialize: {e}")))?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let user: Value =
            serde_json::from_str(&content).map_err(|source| parse_error(path, source))?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    serde_json::from_value(merged).map_err(|source| parse_error(path, source))
}

fn parse_error(path: &Path, source: serde_json::Error) -> SettingsError {
    SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    }
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(settings: &mut DashboardSettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply `MEMDASH_*` overrides read through `lookup`.
///
/// Invalid values are logged and ignored, leaving the file/default value.
pub fn apply_overrides_from<F>(settings: &mut DashboardSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(v) = read("MEMDASH_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read("MEMDASH_PORT") {
        match parse_u16_range(&v, 1, u16::MAX) {
            Some(port) => settings.server.port = port,
            None => warn_invalid("MEMDASH_PORT", &v),
        }
    }
    if let Some(v) = read("MEMDASH_ROOT") {
        settings.server.root_dir = PathBuf::from(v);
    }
    if let Some(v) = read("MEMDASH_NO_BROWSER") {
        match parse_bool(&v) {
            Some(no_browser) => settings.server.auto_open_browser = !no_browser,
            None => warn_invalid("MEMDASH_NO_BROWSER", &v),
        }
    }
    if let Some(v) = read("MEMDASH_BROWSER_DELAY_MS") {
        match parse_u64_range(&v, 0, 60_000) {
            Some(ms) => settings.server.browser_delay_ms = ms,
            None => warn_invalid("MEMDASH_BROWSER_DELAY_MS", &v),
        }
    }
    if let Some(v) = read("MEMDASH_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = read("MEMDASH_LOG_FORMAT") {
        match v.parse::<LogFormat>() {
            Ok(format) => settings.logging.format = format,
            Err(_) => warn_invalid("MEMDASH_LOG_FORMAT", &v),
        }
    }
}

fn warn_invalid(key: &str, value: &str) {
    tracing::warn!(key, value, "invalid env var, ignoring");
}

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({"server": {"port": 8080, "host": "localhost"}});
        let source = serde_json::json!({"server": {"port": 9090}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["server"]["port"], 9090);
        assert_eq!(merged["server"]["host"], "localhost");
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1, "b": 2});
        let source = serde_json::json!({"a": null});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    #[test]
    fn merge_array_replace() {
        let target = serde_json::json!({"items": [1, 2, 3]});
        let source = serde_json::json!({"items": [4]});
        assert_eq!(deep_merge(target, source)["items"], serde_json::json!([4]));
    }

    #[test]
    fn merge_primitive_replaces_object() {
        let target = serde_json::json!({"a": {"nested": true}});
        let source = serde_json::json!({"a": 42});
        assert_eq!(deep_merge(target, source)["a"], 42);
    }

    // ── load_settings_from_path ─────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let settings = load_settings_from_path(Path::new("/nonexistent/memdash.json")).unwrap();
        assert_eq!(settings, DashboardSettings::default());
    }

    #[test]
    fn load_partial_json_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(
            &path,
            r#"{"server": {"port": 3000, "rootDir": "site"}, "logging": {"format": "json"}}"#,
        )
        .unwrap();

        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.root_dir, PathBuf::from("site"));
        assert_eq!(settings.server.host, "127.0.0.1");
        assert!(settings.server.auto_open_browser);
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "not valid json").unwrap();

        let err = load_settings_from_path(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert_eq!(err.path(), Some(path.as_path()));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn load_wrong_type_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"server": {"port": "eighty"}}"#).unwrap();
        let err = load_settings_from_path(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn unreadable_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory named like the settings file exists but cannot be read as one.
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::create_dir(&path).unwrap();

        let err = load_settings_from_path(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
        assert_eq!(
            err.to_string(),
            format!("cannot read settings file {}", path.display())
        );
    }

    // ── env overrides ───────────────────────────────────────────────

    #[test]
    fn env_overrides_apply() {
        let mut settings = DashboardSettings::default();
        apply_overrides_from(
            &mut settings,
            env(&[
                ("MEMDASH_HOST", "0.0.0.0"),
                ("MEMDASH_PORT", "3000"),
                ("MEMDASH_ROOT", "/srv/dash"),
                ("MEMDASH_NO_BROWSER", "yes"),
                ("MEMDASH_BROWSER_DELAY_MS", "250"),
                ("MEMDASH_LOG_LEVEL", "debug"),
                ("MEMDASH_LOG_FORMAT", "json"),
            ]),
        );
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.root_dir, PathBuf::from("/srv/dash"));
        assert!(!settings.server.auto_open_browser);
        assert_eq!(settings.server.browser_delay_ms, 250);
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut settings = DashboardSettings::default();
        apply_overrides_from(
            &mut settings,
            env(&[
                ("MEMDASH_PORT", "0"),
                ("MEMDASH_NO_BROWSER", "maybe"),
                ("MEMDASH_BROWSER_DELAY_MS", "999999"),
                ("MEMDASH_LOG_FORMAT", "xml"),
            ]),
        );
        assert_eq!(settings, DashboardSettings::default());
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut settings = DashboardSettings::default();
        apply_overrides_from(&mut settings, env(&[("MEMDASH_HOST", ""), ("MEMDASH_ROOT", "")]));
        assert_eq!(settings, DashboardSettings::default());
    }

    // ── parsers ─────────────────────────────────────────────────────

    #[test]
    fn parse_bool_variants() {
        for v in ["true", "1", "YES", "on"] {
            assert_eq!(parse_bool(v), Some(true), "{v}");
        }
        for v in ["false", "0", "No", "OFF"] {
            assert_eq!(parse_bool(v), Some(false), "{v}");
        }
        assert_eq!(parse_bool("nah"), None);
    }

    #[test]
    fn parse_u16_range_bounds() {
        assert_eq!(parse_u16_range("1", 1, 65535), Some(1));
        assert_eq!(parse_u16_range("65535", 1, 65535), Some(65535));
        assert_eq!(parse_u16_range("0", 1, 65535), None);
        assert_eq!(parse_u16_range("65536", 1, 65535), None);
        assert_eq!(parse_u16_range("abc", 1, 65535), None);
    }

    #[test]
    fn parse_u64_range_bounds() {
        assert_eq!(parse_u64_range("0", 0, 60_000), Some(0));
        assert_eq!(parse_u64_range("60001", 0, 60_000), None);
    }
}

//! Package-level constants and well-known filenames.

/// Current version of memdash (sourced from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display name used in banners and the `--version` output.
pub const DISPLAY_NAME: &str = "Memory Analysis Dashboard Server";

/// Generated landing page, served at `/`.
pub const INDEX_PAGE: &str = "dashboard_index.html";

/// Classic dashboard, served at `/classic`.
pub const CLASSIC_DASHBOARD: &str = "index.html";

/// Memory analysis dashboard, served at `/memory` and as the lifecycle fallback.
pub const MEMORY_DASHBOARD: &str = "memory_analysis_dashboard.html";

/// Original unsafe/FFI dashboard.
pub const UNSAFE_FFI_DASHBOARD: &str = "unsafe_ffi_dashboard.html";

/// Enhanced unsafe/FFI dashboard, served at `/unsafe`.
pub const UNSAFE_FFI_DASHBOARD_V2: &str = "unsafe_ffi_dashboard_v2.html";

/// Lifecycle dashboard, served at `/lifecycle` when present.
pub const LIFECYCLE_DASHBOARD: &str = "lifecycle_dashboard.html";

/// Analysis data artifact written by the external tracker and fetched client-side.
pub const DATA_FILE: &str = "data.json";

/// Commands that produce the data artifact.
pub const DATA_GENERATORS: &[&str] = &[
    "cargo run --example unsafe_ffi_demo",
    "cargo run --example memory_stress_test",
    "cargo run --example lifecycles_simple",
];

/// Quick-link aliases advertised on the landing page, as `(path, label)`.
pub const QUICK_LINKS: &[(&str, &str)] = &[
    ("/unsafe", "🔒 Unsafe/FFI"),
    ("/memory", "📊 Memory"),
    ("/lifecycle", "⏱️ Lifecycle"),
    ("/classic", "🎛️ Classic"),
];

//! Startup banner.

use std::fmt::Write as _;
use std::path::Path;

use memdash_core::constants::{DATA_FILE, DATA_GENERATORS, DISPLAY_NAME};
use memdash_core::{DataStatus, PresentDashboard};

const RULE_WIDTH: usize = 60;

const SHORTCUTS: &[(&str, &str)] = &[
    ("🏠 Main Dashboard:    ", "/"),
    ("🔒 Unsafe/FFI (New):  ", "/unsafe"),
    ("📊 Memory Analysis:   ", "/memory"),
    ("⏱️  Lifecycle:         ", "/lifecycle"),
    ("🎛️  Classic Dashboard: ", "/classic"),
];

/// Everything the banner shows, gathered before serving starts.
#[derive(Debug)]
pub struct StartupReport<'a> {
    /// Base URL, e.g. `http://localhost:8080`.
    pub url: &'a str,
    /// Absolute serving directory.
    pub root: &'a Path,
    /// Data artifact status.
    pub data: &'a DataStatus,
    /// Dashboards present on disk.
    pub dashboards: &'a [PresentDashboard],
}

/// Warning printed when the data artifact is missing.
pub fn render_missing_data_warning(root: &Path) -> String {
    let mut out = format!(
        "⚠️  Warning: {DATA_FILE} not found in {}\n   Run a Rust example to generate data:\n",
        root.display()
    );
    for cmd in DATA_GENERATORS {
        let _ = writeln!(out, "   • {cmd}");
    }
    out
}

/// Render the banner.
pub fn render_banner(report: &StartupReport<'_>) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let url = report.url;
    let mut out = String::new();

    let _ = writeln!(out, "🚀 {DISPLAY_NAME}");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "📡 Server running at: {url}");
    let _ = writeln!(out, "📁 Serving from: {}", report.root.display());
    let available = if report.data.exists { "✅ Yes" } else { "❌ No" };
    let _ = writeln!(out, "📊 Data available: {available}");
    if report.data.exists {
        let _ = writeln!(out, "📦 Data size: {:.1} KB", report.data.size_kb());
        if let Some(modified) = report.data.modified_at {
            let _ = writeln!(out, "🕒 Last updated: {}", modified.format("%Y-%m-%d %H:%M:%S"));
        }
    }
    out.push('\n');

    out.push_str("Available dashboards:\n");
    for (label, path) in SHORTCUTS {
        let _ = writeln!(out, "  {label} {url}{path}");
    }
    out.push('\n');

    out.push_str("Direct links:\n");
    for dashboard in report.dashboards {
        let _ = writeln!(
            out,
            "  {}: {url}/{} ({:.1} KB)",
            dashboard.entry.description,
            dashboard.entry.file,
            dashboard.size_kb()
        );
    }
    out.push('\n');

    out.push_str("Quick commands:\n");
    out.push_str("  Press Ctrl+C to stop the server\n");
    out.push_str("  Visit any URL above to access the dashboards\n");
    let _ = writeln!(out, "{rule}");
    out
}

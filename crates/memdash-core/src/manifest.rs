//! Known dashboards and their presence on disk.
//!
//! The manifest is fixed at compile time. Presence is never cached: every call
//! to [`DashboardManifest::present`] stats each file again, so a dashboard that
//! is built while the server runs shows up on the next lookup.

use std::path::Path;

use serde::Serialize;

use crate::constants::{
    CLASSIC_DASHBOARD, INDEX_PAGE, LIFECYCLE_DASHBOARD, MEMORY_DASHBOARD, UNSAFE_FFI_DASHBOARD,
    UNSAFE_FFI_DASHBOARD_V2,
};

/// A known dashboard file with the copy used to advertise it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardEntry {
    /// Filename relative to the static root.
    pub file: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Icon shown on the landing page card.
    pub icon: &'static str,
    /// Card title.
    pub title: &'static str,
    /// One-paragraph card summary.
    pub summary: &'static str,
    /// Feature bullets.
    pub features: &'static [&'static str],
}

/// A manifest entry confirmed present on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PresentDashboard {
    /// The manifest entry.
    pub entry: DashboardEntry,
    /// File size at the time of the lookup.
    pub size_bytes: u64,
}

impl PresentDashboard {
    /// Size in KiB, for display.
    #[allow(clippy::cast_precision_loss)]
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

const ENTRIES: &[DashboardEntry] = &[
    DashboardEntry {
        file: INDEX_PAGE,
        description: "🏠 Main Dashboard Index",
        icon: "🏠",
        title: "Dashboard Index",
        summary: "Overview of all available dashboards.",
        features: &[],
    },
    DashboardEntry {
        file: UNSAFE_FFI_DASHBOARD_V2,
        description: "🔒 Unsafe/FFI Dashboard (Enhanced)",
        icon: "🔒",
        title: "Unsafe/FFI Analysis",
        summary: "Monitor unsafe operations and foreign function interface calls with real-time risk assessment and memory violation detection.",
        features: &[
            "Unsafe operation tracking",
            "FFI call monitoring",
            "Memory violation detection",
            "Risk scoring system",
            "SVG export support",
        ],
    },
    DashboardEntry {
        file: MEMORY_DASHBOARD,
        description: "📊 Memory Analysis Dashboard",
        icon: "📊",
        title: "Memory Analysis",
        summary: "Comprehensive memory usage analysis with allocation tracking, performance metrics, and efficiency monitoring.",
        features: &[
            "Memory usage timeline",
            "Allocation size distribution",
            "Performance metrics",
            "Memory efficiency tracking",
            "Interactive charts",
        ],
    },
    DashboardEntry {
        file: LIFECYCLE_DASHBOARD,
        description: "⏱️ Lifecycle Tracking Dashboard",
        icon: "⏱️",
        title: "Lifecycle Tracking",
        summary: "Follow variables from allocation to drop, with scope and ownership timelines.",
        features: &[
            "Variable lifetime timeline",
            "Scope tracking",
            "Ownership transfers",
            "Drop ordering",
        ],
    },
    DashboardEntry {
        file: UNSAFE_FFI_DASHBOARD,
        description: "🔒 Unsafe/FFI Dashboard (Classic)",
        icon: "🛡️",
        title: "Unsafe/FFI (Classic)",
        summary: "Original unsafe operations dashboard with detailed memory safety analysis and visualization.",
        features: &[
            "Classic interface design",
            "Detailed safety metrics",
            "Memory violation tracking",
            "Risk assessment",
            "Legacy compatibility",
        ],
    },
    DashboardEntry {
        file: CLASSIC_DASHBOARD,
        description: "🎛️ Classic Dashboard",
        icon: "🎛️",
        title: "Classic Dashboard",
        summary: "Original dashboard interface with basic memory tracking and visualization features for simple analysis.",
        features: &[
            "Basic memory tracking",
            "Simple visualization",
            "Legacy compatibility",
            "Lightweight interface",
            "Quick overview",
        ],
    },
];

/// Fixed list of known dashboards.
#[derive(Clone, Copy, Debug)]
pub struct DashboardManifest {
    entries: &'static [DashboardEntry],
}

impl DashboardManifest {
    /// The built-in manifest.
    pub const fn builtin() -> Self {
        Self { entries: ENTRIES }
    }

    /// All known entries, present or not.
    pub fn entries(&self) -> &'static [DashboardEntry] {
        self.entries
    }

    /// Look up an entry by filename.
    pub fn get(&self, file: &str) -> Option<&'static DashboardEntry> {
        self.entries.iter().find(|e| e.file == file)
    }

    /// Entries whose file is a regular file under `root` right now, in manifest order.
    pub fn present(&self, root: &Path) -> Vec<PresentDashboard> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let meta = std::fs::metadata(root.join(entry.file)).ok()?;
                meta.is_file().then_some(PresentDashboard {
                    entry: *entry,
                    size_bytes: meta.len(),
                })
            })
            .collect()
    }
}

impl Default for DashboardManifest {
    fn default() -> Self {
        Self::builtin()
    }
}

//! Friendly URL aliases for the dashboards.
//!
//! Resolution is an exact match on the request path. Only the lifecycle alias
//! consults the filesystem, and only to choose between two fixed files; every
//! other alias is a pure lookup. Unmatched paths pass through unchanged and
//! the static file service decides whether they exist.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use memdash_core::constants::{
    CLASSIC_DASHBOARD, INDEX_PAGE, LIFECYCLE_DASHBOARD, MEMORY_DASHBOARD, UNSAFE_FFI_DASHBOARD_V2,
};

/// Where an alias points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AliasTarget {
    /// Always this file.
    File(&'static str),
    /// `preferred` if it exists under the root at request time, else `fallback`.
    PreferIfPresent {
        /// File served when present.
        preferred: &'static str,
        /// File served otherwise.
        fallback: &'static str,
    },
}

const LIFECYCLE: AliasTarget = AliasTarget::PreferIfPresent {
    preferred: LIFECYCLE_DASHBOARD,
    fallback: MEMORY_DASHBOARD,
};

const BUILTIN: &[(&str, AliasTarget)] = &[
    ("/", AliasTarget::File(INDEX_PAGE)),
    ("/unsafe", AliasTarget::File(UNSAFE_FFI_DASHBOARD_V2)),
    ("/unsafe/", AliasTarget::File(UNSAFE_FFI_DASHBOARD_V2)),
    ("/memory", AliasTarget::File(MEMORY_DASHBOARD)),
    ("/memory/", AliasTarget::File(MEMORY_DASHBOARD)),
    ("/classic", AliasTarget::File(CLASSIC_DASHBOARD)),
    ("/classic/", AliasTarget::File(CLASSIC_DASHBOARD)),
    ("/lifecycle", LIFECYCLE),
    ("/lifecycle/", LIFECYCLE),
];

/// Ordered, read-only table of request path to target.
#[derive(Clone, Copy, Debug)]
pub struct AliasTable {
    entries: &'static [(&'static str, AliasTarget)],
}

impl AliasTable {
    /// The built-in alias table.
    pub const fn builtin() -> Self {
        Self { entries: BUILTIN }
    }

    /// Exact-match lookup.
    pub fn get(&self, request_path: &str) -> Option<AliasTarget> {
        self.entries
            .iter()
            .find(|(path, _)| *path == request_path)
            .map(|(_, target)| *target)
    }

    /// All entries, in table order.
    pub fn entries(&self) -> &'static [(&'static str, AliasTarget)] {
        self.entries
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Maps request paths to files under a static root.
#[derive(Clone, Debug)]
pub struct PathAliasResolver {
    root: PathBuf,
    table: AliasTable,
}

impl PathAliasResolver {
    /// Resolver over the built-in table.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_table(root, AliasTable::builtin())
    }

    /// Resolver over a custom table.
    pub fn with_table(root: impl Into<PathBuf>, table: AliasTable) -> Self {
        Self {
            root: root.into(),
            table,
        }
    }

    /// Static root the conditional alias is checked against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a request path to the path the file service should see.
    ///
    /// Aliases resolve to `/<file>`; anything else is returned unchanged.
    pub fn resolve<'a>(&self, request_path: &'a str) -> Cow<'a, str> {
        match self.table.get(request_path) {
            Some(target) => Cow::Owned(format!("/{}", self.target_file(target))),
            None => Cow::Borrowed(request_path),
        }
    }

    fn target_file(&self, target: AliasTarget) -> &'static str {
        match target {
            AliasTarget::File(file) => file,
            AliasTarget::PreferIfPresent {
                preferred,
                fallback,
            } => {
                if self.root.join(preferred).exists() {
                    preferred
                } else {
                    fallback
                }
            }
        }
    }
}

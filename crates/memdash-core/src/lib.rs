//! # memdash-core
//!
//! Foundation types for the memdash dashboard server.
//!
//! - **Constants**: well-known dashboard filenames and the data artifact name
//! - **Errors**: [`DashboardError`] covering every fatal startup failure
//! - **Manifest**: [`DashboardManifest`], the fixed list of known dashboards,
//!   filtered against the filesystem on every lookup
//! - **Data status**: [`DataStatus`], a one-shot stat of the data artifact
//! - **Landing page**: [`ensure_index_page`], idempotent generation of
//!   `dashboard_index.html`

#![deny(unsafe_code)]

pub mod constants;
pub mod data_status;
pub mod errors;
pub mod index_page;
pub mod manifest;

pub use data_status::DataStatus;
pub use errors::{DashboardError, Result};
pub use index_page::{IndexOutcome, ensure_index_page, render_index_page};
pub use manifest::{DashboardEntry, DashboardManifest, PresentDashboard};

//! # memdash-server
//!
//! Axum HTTP server that delivers pre-built dashboard pages from a fixed root.
//!
//! - Port discovery: [`find_available_port`] probes `[start, start + 100)`
//! - Alias routing: [`PathAliasResolver`] maps `/unsafe`, `/memory`, ... to files
//! - Static delivery: `tower-http` `ServeDir` with CORS and asset cache headers
//! - Access log: one classified event per request ([`Classification`])
//! - Graceful shutdown via `tokio::signal` + `CancellationToken`

#![deny(unsafe_code)]

pub mod access_log;
pub mod alias;
pub mod config;
pub mod headers;
pub mod port;
pub mod server;
pub mod shutdown;

pub use access_log::{Classification, RequestOutcome, RequestRecord};
pub use alias::{AliasTable, AliasTarget, PathAliasResolver};
pub use config::ServerConfig;
pub use port::{PORT_SEARCH_SPAN, find_available_port, find_available_port_on};
pub use server::{DashboardServer, bind_listener};
pub use shutdown::ShutdownCoordinator;

//! `DashboardServer`: Axum static file server.
//!
//! Request pipeline, outermost first:
//! 1. access log (sees the URI as received and the final status)
//! 2. CORS headers on every response
//! 3. CORS preflight answering `OPTIONS`
//! 4. alias rewrite (`/memory` → `/memory_analysis_dashboard.html`)
//! 5. asset cache directive, keyed on the rewritten path
//! 6. `ServeDir` over the root directory

use std::borrow::Cow;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::Uri;
use axum::middleware::{self, Next};
use axum::response::Response;
use memdash_core::{DashboardError, Result};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::access_log;
use crate::alias::PathAliasResolver;
use crate::config::ServerConfig;
use crate::headers;
use crate::shutdown::ShutdownCoordinator;

/// The dashboard server.
pub struct DashboardServer {
    config: ServerConfig,
    resolver: Arc<PathAliasResolver>,
    shutdown: Arc<ShutdownCoordinator>,
}

impl DashboardServer {
    /// Create a server for `config`.
    pub fn new(config: ServerConfig) -> Self {
        let resolver = Arc::new(PathAliasResolver::new(config.root_dir.clone()));
        Self {
            config,
            resolver,
            shutdown: Arc::new(ShutdownCoordinator::new()),
        }
    }

    /// Build the Axum router.
    pub fn router(&self) -> Router {
        Router::new()
            .fallback_service(ServeDir::new(&self.config.root_dir))
            .layer(middleware::from_fn(headers::cache_assets))
            .layer(middleware::from_fn_with_state(
                Arc::clone(&self.resolver),
                rewrite_alias,
            ))
            .layer(headers::preflight_layer())
            .layer(middleware::from_fn(headers::cors_headers))
            .layer(middleware::from_fn(access_log::log_requests))
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// Serve on `listener` until the shutdown coordinator fires.
    ///
    /// After the signal no new connections are accepted; in-flight requests
    /// run to completion.
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let token = self.shutdown.token();
        let addr = listener.local_addr().map_err(DashboardError::Serve)?;
        tracing::info!(
            %addr,
            root = %self.config.root_dir.display(),
            "dashboard server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await
            .map_err(DashboardError::Serve)?;

        tracing::info!("dashboard server stopped");
        Ok(())
    }
}

/// Bind the listening socket for `config`.
///
/// A failure here right after port discovery usually means another process
/// took the port; it is reported as [`DashboardError::Bind`].
pub async fn bind_listener(config: &ServerConfig) -> Result<TcpListener> {
    let addr = config.socket_addr();
    TcpListener::bind(addr)
        .await
        .map_err(|source| DashboardError::Bind {
            addr: addr.to_string(),
            source,
        })
}

async fn rewrite_alias(
    State(resolver): State<Arc<PathAliasResolver>>,
    mut req: Request,
    next: Next,
) -> Response {
    let target = match resolver.resolve(req.uri().path()) {
        Cow::Owned(path) => Some(path),
        Cow::Borrowed(_) => None,
    };
    if let Some(path) = target {
        match with_path(req.uri(), &path) {
            Ok(uri) => {
                tracing::debug!(from = %req.uri(), to = %uri, "alias resolved");
                *req.uri_mut() = uri;
            }
            Err(e) => tracing::warn!(error = %e, uri = %req.uri(), "failed to rewrite alias"),
        }
    }
    next.run(req).await
}

/// Replace the path of `uri`, keeping its query string.
fn with_path(uri: &Uri, path: &str) -> std::result::Result<Uri, axum::http::Error> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_owned(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse()?);
    Ok(Uri::from_parts(parts)?)
}

//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use memdash_core::{DashboardError, Result};
use memdash_settings::{ServerSettings, SettingsError};
use serde::Serialize;

/// Immutable configuration for one server run.
///
/// Built once at startup and handed to [`crate::DashboardServer`]; nothing
/// reads settings after that.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    /// Directory the pages are served from.
    pub root_dir: PathBuf,
    /// Interface to bind.
    pub host: IpAddr,
    /// Port to bind. Already probed free by the time the config is built.
    pub port: u16,
    /// Open the default browser after startup.
    pub auto_open_browser: bool,
    /// Delay before the browser is opened.
    pub browser_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("web_dashboard"),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            auto_open_browser: true,
            browser_delay: Duration::from_millis(1500),
        }
    }
}

impl ServerConfig {
    /// Convert loaded settings, binding to `port` instead of the configured base port.
    pub fn from_settings(
        settings: &ServerSettings,
        port: u16,
    ) -> std::result::Result<Self, SettingsError> {
        let host = parse_host(&settings.host)?;
        Ok(Self {
            root_dir: settings.root_dir.clone(),
            host,
            port,
            auto_open_browser: settings.auto_open_browser,
            browser_delay: Duration::from_millis(settings.browser_delay_ms),
        })
    }

    /// Fail with [`DashboardError::MissingRoot`] unless the root is a directory.
    pub fn ensure_root(&self) -> Result<()> {
        if self.root_dir.is_dir() {
            Ok(())
        } else {
            Err(DashboardError::MissingRoot(self.root_dir.clone()))
        }
    }

    /// Socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// URL a local browser should open.
    ///
    /// Loopback and wildcard binds are shown as `localhost`.
    pub fn url(&self) -> String {
        if self.host.is_loopback() || self.host.is_unspecified() {
            format!("http://localhost:{}", self.port)
        } else {
            format!("http://{}", self.socket_addr())
        }
    }
}

/// Parse a host setting. `localhost` is accepted as the IPv4 loopback.
pub fn parse_host(host: &str) -> std::result::Result<IpAddr, SettingsError> {
    let host = host.trim();
    if host.eq_ignore_ascii_case("localhost") {
        return Ok(IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
    host.parse()
        .map_err(|_| SettingsError::InvalidValue(format!("server.host is not an IP address: {host}")))
}

//! Best-effort browser launch after startup.
//!
//! The launch runs as one detached task: sleep, open once, report, exit. It
//! shares no state with the server and nothing waits for it, so a failure here
//! can only produce a warning.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Recoverable failure to open a browser.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The platform launcher reported an error.
    #[error("{0}")]
    Launch(#[from] std::io::Error),

    /// The blocking launch task panicked or was cancelled.
    #[error("browser launch task failed: {0}")]
    Task(String),
}

/// Something that can open a URL.
pub trait UrlOpener: Send + Sync + 'static {
    /// Open `url`. May block.
    fn open(&self, url: &str) -> Result<(), BrowserError>;
}

/// Opens URLs in the system default browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), BrowserError> {
        webbrowser::open(url)?;
        Ok(())
    }
}

/// Wait `delay`, then open `url` on a blocking thread.
pub async fn open_after(
    opener: Arc<dyn UrlOpener>,
    url: String,
    delay: Duration,
) -> Result<(), BrowserError> {
    tokio::time::sleep(delay).await;
    tokio::task::spawn_blocking(move || opener.open(&url))
        .await
        .map_err(|e| BrowserError::Task(e.to_string()))?
}

/// Spawn the detached launch task.
///
/// The handle is returned for tests; the serving path drops it.
pub fn spawn_browser_launch(
    opener: Arc<dyn UrlOpener>,
    url: String,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match open_after(opener, url.clone(), delay).await {
            Ok(()) => {
                info!(%url, "browser opened");
                println!("🌐 Opened {url} in your default browser");
            }
            Err(e) => {
                warn!(%url, error = %e, "could not open browser");
                println!("⚠️  Could not open browser automatically: {e}");
                println!("   Please manually visit: {url}");
            }
        }
    })
}

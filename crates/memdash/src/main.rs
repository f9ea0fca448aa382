//! # memdash
//!
//! Memory analysis dashboard server binary. Loads settings, prepares the
//! static root, picks a port, prints the startup report and serves until
//! interrupted.

#![deny(unsafe_code)]

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use memdash::browser::{SystemBrowser, spawn_browser_launch};
use memdash::cli::{Cli, version_line};
use memdash::report::{StartupReport, render_banner, render_missing_data_warning};
use memdash_core::constants::{DATA_FILE, INDEX_PAGE};
use memdash_core::{DashboardError, DashboardManifest, DataStatus, IndexOutcome, ensure_index_page};
use memdash_server::{DashboardServer, ServerConfig, bind_listener, find_available_port_on};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", version_line());
        return ExitCode::SUCCESS;
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let mut settings = memdash_settings::load_settings().context("Failed to load settings")?;
    cli.apply(&mut settings);
    settings.validate().context("Invalid command-line options")?;
    let _ = memdash_logging::init_subscriber(&settings.logging);

    let mut config = ServerConfig::from_settings(&settings.server, settings.server.port)
        .context("Invalid server settings")?;
    // Nothing below may open a socket until the root is confirmed.
    config.ensure_root()?;
    let root = config.root_dir.clone();

    let manifest = DashboardManifest::builtin();
    if ensure_index_page(&root, &manifest)? == IndexOutcome::Created {
        println!("📝 Created dashboard index: {}", root.join(INDEX_PAGE).display());
    }

    let data = DataStatus::probe(&root.join(DATA_FILE));
    if !data.exists {
        println!("{}", render_missing_data_warning(&root));
    }
    let dashboards = manifest.present(&root);

    config.port = find_available_port_on(config.host, config.port)?;
    if config.port != settings.server.port {
        tracing::info!(
            requested = settings.server.port,
            chosen = config.port,
            "requested port busy, using next free port"
        );
    }
    let listener = bind_listener(&config).await?;

    let url = config.url();
    let auto_open = config.auto_open_browser;
    let browser_delay = config.browser_delay;
    let server = DashboardServer::new(config);
    // Handlers go in before the banner so an early Ctrl+C still exits cleanly.
    let signals = server.shutdown().listen_for_signals();

    let absolute_root = root.canonicalize().unwrap_or_else(|_| root.clone());
    print!(
        "{}",
        render_banner(&StartupReport {
            url: &url,
            root: &absolute_root,
            data: &data,
            dashboards: &dashboards,
        })
    );

    if auto_open {
        // Detached: the serving path never waits on the browser.
        let _ = spawn_browser_launch(Arc::new(SystemBrowser), url, browser_delay);
    }

    let served = server.serve(listener).await;
    server.shutdown().shutdown();
    let _ = signals.await;
    served?;

    println!("\n👋 Server stopped by user");
    println!("   Thanks for using the Memory Analysis Dashboard!");
    Ok(())
}

fn report_error(err: &anyhow::Error) {
    let dashboard_err = err.downcast_ref::<DashboardError>();
    tracing::error!(
        kind = dashboard_err.map_or("other", DashboardError::error_kind),
        error = %format!("{err:#}"),
        "startup failed"
    );
    eprintln!("❌ Error: {err:#}");
    if let Some(hint) = dashboard_err.and_then(DashboardError::hint) {
        eprintln!("   {hint}");
    }
}

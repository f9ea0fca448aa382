//! End-to-end tests: a real listener on a discovered port, driven with reqwest.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use memdash_server::{
    DashboardServer, ServerConfig, ShutdownCoordinator, bind_listener, find_available_port,
};
use tokio::task::JoinHandle;

type Running = (String, Arc<ShutdownCoordinator>, JoinHandle<memdash_core::Result<()>>);

fn site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let write = |name: &str, body: &str| std::fs::write(dir.path().join(name), body).unwrap();
    write("dashboard_index.html", "<h1>landing</h1>");
    write("unsafe_ffi_dashboard_v2.html", "<h1>unsafe v2</h1>");
    write("memory_analysis_dashboard.html", "<h1>memory</h1>");
    write("styles.css", "body { margin: 0 }");
    dir
}

/// Each test probes its own base port so parallel tests do not race for one.
async fn start(root: &Path, base_port: u16) -> Running {
    let port = find_available_port(base_port).unwrap();
    let config = ServerConfig {
        root_dir: root.to_path_buf(),
        port,
        auto_open_browser: false,
        ..ServerConfig::default()
    };
    let base = config.url();
    let listener = bind_listener(&config).await.unwrap();
    let server = DashboardServer::new(config);
    let shutdown = Arc::clone(server.shutdown());
    let handle = tokio::spawn(async move { server.serve(listener).await });
    (base, shutdown, handle)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn serves_aliases_over_http() {
    let dir = site();
    let (base, shutdown, handle) = start(dir.path(), 18_080).await;
    let http = client();

    let resp = http.get(format!("{base}/")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    assert_eq!(resp.text().await.unwrap(), "<h1>landing</h1>");

    let resp = http.get(format!("{base}/unsafe")).send().await.unwrap();
    assert_eq!(resp.text().await.unwrap(), "<h1>unsafe v2</h1>");

    let resp = http.get(format!("{base}/lifecycle")).send().await.unwrap();
    assert_eq!(resp.text().await.unwrap(), "<h1>memory</h1>");

    std::fs::write(dir.path().join("lifecycle_dashboard.html"), "<h1>lifecycle</h1>").unwrap();
    let resp = http.get(format!("{base}/lifecycle")).send().await.unwrap();
    assert_eq!(resp.text().await.unwrap(), "<h1>lifecycle</h1>");

    shutdown.shutdown();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn asset_and_missing_responses() {
    let dir = site();
    let (base, shutdown, handle) = start(dir.path(), 18_280).await;
    let http = client();

    let resp = http.get(format!("{base}/styles.css")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.headers()["cache-control"], "public, max-age=3600");

    let resp = http.get(format!("{base}/memory")).send().await.unwrap();
    assert!(resp.headers().get("cache-control").is_none());

    let resp = http.get(format!("{base}/nothing-here.html")).send().await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(resp.headers()["access-control-allow-methods"], "GET, POST, OPTIONS");

    shutdown.shutdown();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn shutdown_stops_accepting_connections() {
    let dir = site();
    let (base, shutdown, handle) = start(dir.path(), 18_480).await;

    let resp = client().get(format!("{base}/")).send().await.unwrap();
    assert!(resp.status().is_success());

    shutdown.shutdown();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("serve should return after shutdown")
        .unwrap()
        .unwrap();

    // Fresh client so no pooled keep-alive connection is reused.
    let after = client().get(format!("{base}/")).send().await;
    assert!(after.is_err());
}

//! Landing page generation.
//!
//! `dashboard_index.html` is written only when it does not exist yet. An
//! existing file is never touched, so hand edits and pages from earlier runs
//! survive restarts. Cards are rendered only for dashboards present on disk at
//! generation time.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use crate::constants::{DATA_FILE, DATA_GENERATORS, INDEX_PAGE, QUICK_LINKS};
use crate::errors::{DashboardError, Result};
use crate::manifest::{DashboardManifest, PresentDashboard};

/// What [`ensure_index_page`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexOutcome {
    /// A new landing page was written.
    Created,
    /// A landing page already existed and was left as is.
    AlreadyPresent,
}

/// Make sure `root/dashboard_index.html` exists, generating it if needed.
///
/// Uses create-new semantics, so a file that appears between the existence
/// check and the write is not truncated.
pub fn ensure_index_page(root: &Path, manifest: &DashboardManifest) -> Result<IndexOutcome> {
    let path = root.join(INDEX_PAGE);
    if path.exists() {
        tracing::debug!(path = %path.display(), "landing page already present");
        return Ok(IndexOutcome::AlreadyPresent);
    }

    let dashboards = manifest.present(root);
    let html = render_index_page(&dashboards);

    let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(IndexOutcome::AlreadyPresent);
        }
        Err(source) => return Err(DashboardError::IndexPage { path, source }),
    };
    write_or_discard(&path, file, html.as_bytes()).map_err(|source| {
        DashboardError::IndexPage {
            path: path.clone(),
            source,
        }
    })?;

    tracing::info!(
        path = %path.display(),
        cards = dashboards.iter().filter(|d| d.entry.file != INDEX_PAGE).count(),
        "generated landing page"
    );
    Ok(IndexOutcome::Created)
}

/// Write `bytes` into the freshly created `path`.
///
/// On failure the file is removed again: a partial page left behind would be
/// reported as [`IndexOutcome::AlreadyPresent`] by every later run.
fn write_or_discard(path: &Path, mut out: impl io::Write, bytes: &[u8]) -> io::Result<()> {
    let written = out.write_all(bytes).and_then(|()| out.flush());
    if written.is_err() {
        drop(out);
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove partial landing page");
        }
    }
    written
}

/// Render the landing page for the given present dashboards.
///
/// The landing page itself is skipped if it appears in `dashboards`.
pub fn render_index_page(dashboards: &[PresentDashboard]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>🦀 Memory Analysis Dashboard - Home</title>
    <link rel="stylesheet" href="styles.css">
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🔍 Memory Analysis Dashboard</h1>
            <p>Comprehensive Rust memory tracking and analysis suite</p>
            <div class="quick-links">
{quick_links}            </div>
        </div>

        <div class="data-status">
            <h3>📊 Data Status</h3>
            <p id="data-status-text">🔄 Checking for analysis data...</p>
        </div>

        <div class="dashboard-grid">
{cards}        </div>

        <div class="footer">
            <p>🦀 Rust Memory Analysis Dashboard</p>
            <p>Server running on <span id="server-info"></span></p>
            <p><small>Use Ctrl+C to stop the server</small></p>
        </div>
    </div>

    <script>{js}</script>
</body>
</html>
"#,
        css = INDEX_CSS,
        quick_links = render_quick_links(),
        cards = render_cards(dashboards),
        js = render_script(),
    )
}

fn render_quick_links() -> String {
    let mut out = String::new();
    for (path, label) in QUICK_LINKS {
        let _ = writeln!(
            out,
            r#"                <a href="{path}" class="quick-link">{label}</a>"#
        );
    }
    out
}

fn render_cards(dashboards: &[PresentDashboard]) -> String {
    let mut out = String::new();
    for dashboard in dashboards.iter().filter(|d| d.entry.file != INDEX_PAGE) {
        let entry = &dashboard.entry;
        let mut features = String::new();
        for feature in entry.features {
            let _ = writeln!(features, "                    <li>{feature}</li>");
        }
        let _ = write!(
            out,
            r#"            <a href="{file}" class="dashboard-card">
                <span class="card-icon">{icon}</span>
                <div class="card-title">
                    <span class="status-indicator status-ready"></span>
                    {title}
                </div>
                <div class="card-description">{summary}</div>
                <ul class="card-features">
{features}                </ul>
            </a>
"#,
            file = entry.file,
            icon = entry.icon,
            title = entry.title,
            summary = entry.summary,
        );
    }
    out
}

fn render_script() -> String {
    let commands = DATA_GENERATORS
        .iter()
        .map(|cmd| format!("`<code>{cmd}</code>`"))
        .collect::<Vec<_>>()
        .join(" + '<br>' +\n                ");

    format!(
        r"
        async function checkDataStatus() {{
            const target = document.getElementById('data-status-text');
            try {{
                const response = await fetch('{DATA_FILE}', {{ cache: 'no-store' }});
                if (!response.ok) {{
                    throw new Error('Data not found');
                }}
                const data = await response.json();
                const allocCount = data.memory_stats?.total_allocations || 0;
                const unsafeOps = data.unsafe_stats?.total_operations || 0;
                target.innerHTML =
                    `✅ Analysis data loaded successfully<br>` +
                    `📈 ${{allocCount.toLocaleString()}} allocations tracked<br>` +
                    `🔒 ${{unsafeOps.toLocaleString()}} unsafe operations monitored<br>` +
                    `🕒 Last checked: ${{new Date().toLocaleString()}}`;
            }} catch (error) {{
                target.innerHTML =
                    `⚠️ No analysis data found. Run a Rust example to generate data:<br>` +
                {commands};
            }}
        }}

        document.getElementById('server-info').textContent = window.location.host;
        checkDataStatus();
        setInterval(checkDataStatus, 30000);
    "
    )
}

const INDEX_CSS: &str = r"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 0;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
        }
        .container { max-width: 1200px; margin: 0 auto; padding: 40px 20px; }
        .header { text-align: center; color: white; margin-bottom: 50px; }
        .header h1 { font-size: 3rem; margin-bottom: 10px; text-shadow: 0 2px 4px rgba(0,0,0,0.3); }
        .header p { font-size: 1.2rem; opacity: 0.9; }
        .dashboard-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(350px, 1fr));
            gap: 30px;
            margin-top: 40px;
        }
        .dashboard-card {
            background: white;
            border-radius: 16px;
            padding: 30px;
            box-shadow: 0 10px 30px rgba(0,0,0,0.2);
            transition: transform 0.3s ease, box-shadow 0.3s ease;
            text-decoration: none;
            color: inherit;
            position: relative;
            overflow: hidden;
        }
        .dashboard-card:hover { transform: translateY(-5px); box-shadow: 0 20px 40px rgba(0,0,0,0.3); }
        .dashboard-card::before {
            content: '';
            position: absolute;
            top: 0; left: 0; right: 0;
            height: 4px;
            background: linear-gradient(90deg, #667eea, #764ba2);
        }
        .card-icon { font-size: 3rem; margin-bottom: 20px; display: block; }
        .card-title { font-size: 1.5rem; font-weight: bold; margin-bottom: 15px; color: #2c3e50; }
        .card-description { color: #666; line-height: 1.6; margin-bottom: 20px; }
        .card-features { list-style: none; padding: 0; margin: 0; }
        .card-features li { padding: 5px 0; color: #7f8c8d; font-size: 0.9rem; }
        .card-features li:before { content: '✓ '; color: #27ae60; font-weight: bold; }
        .status-indicator {
            display: inline-block;
            width: 10px;
            height: 10px;
            border-radius: 50%;
            margin-right: 8px;
            animation: pulse 2s infinite;
        }
        @keyframes pulse { 0% { opacity: 1; } 50% { opacity: 0.5; } 100% { opacity: 1; } }
        .status-ready { background: #27ae60; }
        .footer { text-align: center; color: white; margin-top: 60px; opacity: 0.8; }
        .data-status {
            background: rgba(255,255,255,0.1);
            border-radius: 12px;
            padding: 25px;
            margin-bottom: 30px;
            color: white;
        }
        .data-status h3 { margin-top: 0; }
        .data-status code { background: rgba(255,255,255,0.2); padding: 4px 8px; border-radius: 4px; }
        .quick-links { display: flex; justify-content: center; gap: 15px; margin-top: 30px; flex-wrap: wrap; }
        .quick-link {
            background: rgba(255,255,255,0.2);
            color: white;
            padding: 10px 20px;
            border-radius: 25px;
            text-decoration: none;
            font-size: 0.9rem;
        }
        .quick-link:hover { background: rgba(255,255,255,0.3); }
    ";

//! Response headers added to every static response.

use axum::extract::Request;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{Any, CorsLayer};

/// Extensions served with a public one-hour cache directive.
pub const CACHEABLE_EXTENSIONS: &[&str] = &["css", "js", "svg", "png", "jpg"];

/// Cache directive for asset responses.
pub const ASSET_CACHE_CONTROL: &str = "public, max-age=3600";

/// `Access-Control-Allow-Origin` value.
pub const ALLOW_ORIGIN: &str = "*";

/// `Access-Control-Allow-Methods` value.
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// `Access-Control-Allow-Headers` value.
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Whether a (resolved) request path names a cacheable asset.
pub fn is_cacheable(path: &str) -> bool {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.rsplit_once('.').is_some_and(|(stem, ext)| {
        !stem.is_empty()
            && CACHEABLE_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
    })
}

/// Middleware: add the asset cache directive based on the resolved path.
///
/// Must run inside the alias rewrite so it sees the final file name.
pub async fn cache_assets(req: Request, next: Next) -> Response {
    let cacheable = is_cacheable(req.uri().path());
    let mut response = next.run(req).await;
    if cacheable {
        let _ = response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(ASSET_CACHE_CONTROL),
        );
    }
    response
}

/// Middleware: stamp the permissive CORS headers on every response.
///
/// Applied outside [`preflight_layer`] so 404s, 405s and preflight replies all
/// carry the same three headers.
pub async fn cors_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    let _ = headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    let _ = headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    let _ = headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    response
}

/// Answers `OPTIONS` preflight requests without touching the file service.
pub fn preflight_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_extensions_are_cacheable() {
        for path in [
            "/styles.css",
            "/app.js",
            "/img/logo.svg",
            "/img/chart.png",
            "/photo.jpg",
            "/LOUD.CSS",
        ] {
            assert!(is_cacheable(path), "{path}");
        }
    }

    #[test]
    fn pages_and_data_are_not_cacheable() {
        for path in [
            "/",
            "/dashboard_index.html",
            "/memory_analysis_dashboard.html",
            "/data.json",
            "/app.js.map",
            "/css",
            "/.js",
            "/assets.css/readme",
        ] {
            assert!(!is_cacheable(path), "{path}");
        }
    }

    #[test]
    fn preflight_layer_builds() {
        let _layer = preflight_layer();
    }
}

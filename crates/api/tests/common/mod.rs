#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use grokmind_api::config::ServerConfig;
use grokmind_api::router::build_app_router;
use grokmind_api::state::AppState;
use grokmind_core::catalog::Catalog;
use grokmind_core::locale::Locale;

/// Host used in generated share links during tests.
pub const PUBLIC_HOST: &str = "grokmind.test";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and the bundled catalog.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_host: PUBLIC_HOST.to_string(),
        default_locale: Locale::En,
        catalog_path: None,
    }
}

/// Build the full application router with all middleware layers.
///
/// Uses the same [`build_app_router`] as `main.rs` so integration tests
/// exercise the production middleware stack.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(Catalog::bundled().unwrap()),
    };
    build_app_router(state, &config).unwrap()
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with extra headers.
pub async fn get_with_headers(app: Router, uri: &str, headers: &[(&str, &str)]) -> Response {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

//! Route definitions for result ids.
//!
//! Two routers are provided:
//! - `router()` for the JSON API mounted at `/api/v1/results`
//! - `link_router()` for shared links at the root (`/result/{id}`)

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::results;
use crate::state::AppState;

/// Result API routes mounted at `/results`.
///
/// ```text
/// POST /      -> create_result
/// GET  /{id}  -> get_result
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(results::create_result))
        .route("/{id}", get(results::get_result))
}

/// Shared-link route, mounted at the root (NOT under `/api/v1`).
///
/// ```text
/// GET /result/{id} -> open_result_link
/// ```
pub fn link_router() -> Router<AppState> {
    Router::new().route("/result/{id}", get(results::open_result_link))
}

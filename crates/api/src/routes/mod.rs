pub mod health;
pub mod results;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /results                                         encode a scored answer (POST)
/// /results/{id}                                    resolve a result id (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/results", results::router())
}

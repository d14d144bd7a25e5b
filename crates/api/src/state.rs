use std::sync::Arc;

use grokmind_core::catalog::Catalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the catalog is loaded once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub catalog: Arc<Catalog>,
}

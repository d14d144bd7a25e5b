use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use grokmind_core::catalog::Catalog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grokmind_api::config::ServerConfig;
use grokmind_api::router::build_app_router;
use grokmind_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grokmind_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = %config.port,
        public_host = %config.public_host,
        default_locale = %config.default_locale,
        "Loaded server configuration"
    );

    // --- Catalog ---
    let catalog = load_catalog(&config)?;
    tracing::info!(
        personas = catalog.roster().len(),
        quizzes = catalog.quizzes().len(),
        styles = catalog.styles().len(),
        "Catalog loaded"
    );

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(catalog),
    };

    // --- Router ---
    let app = build_app_router(state, &config)?;

    // --- Start server ---
    let ip = config
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Load the catalog from `CATALOG_PATH`, or fall back to the bundled one.
fn load_catalog(config: &ServerConfig) -> anyhow::Result<Catalog> {
    match &config.catalog_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog {}", path.display()))?;
            Catalog::from_json(&json)
                .with_context(|| format!("Failed to load catalog {}", path.display()))
        }
        None => Catalog::bundled().context("Bundled catalog is invalid"),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

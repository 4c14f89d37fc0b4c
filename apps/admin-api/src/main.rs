//! # Statusguard Admin API
//!
//! Entry point: sets up tracing, opens the database, and serves the router.
//!
//! ```text
//! AdminConfig::load() ──► Database::new (migrations) ──► AppState
//!                                                          │
//!                                 build_router + TraceLayer ◄┘
//!                                          │
//!                                          ▼
//!                              axum::serve (graceful shutdown)
//! ```

use std::sync::Arc;

use anyhow::Context;
use statusguard_admin_api::{routes, AdminConfig, AppState};
use statusguard_db::{Database, DbConfig};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Statusguard admin API...");

    let config = AdminConfig::load().context("invalid configuration")?;
    let addr = config.socket_addr().context("invalid bind address")?;
    info!(
        %addr,
        database = %config.database_path,
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(&config.database_path))
        .await
        .context("failed to open database")?;
    info!("Database ready");

    let state = Arc::new(AppState::new(db.clone(), config));

    let app = routes::build_router(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    info!("statusguard admin API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server crashed")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

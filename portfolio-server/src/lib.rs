//! # portfolio-server
//!
//! Backend for a personal portfolio site. Two jobs:
//!
//! - persist contact form submissions (`POST /api/contact`)
//! - proxy GitHub's public API so the browser avoids cross-origin limits
//!   (`GET /api/github/{username}`, `.../repos`, `.../stats`)
//!
//! ## Modules
//!
//! - [`config`] – AppConfig loaded from env
//! - [`logger`] – tracing subscriber setup
//! - [`error`] – AppError and its JSON response shape
//! - [`validation`] – contact form checks
//! - [`routes`] – axum handlers
//! - [`state`] – shared handler state (contact store + GitHub client)
//! - [`cli`] – `portfolio` command line

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::http::{header::CONTENT_TYPE, Method};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod routes;
pub mod state;
pub mod validation;

pub use cli::{recent_messages, Cli, Commands};
pub use config::{AppConfig, StoreKind};
pub use error::AppError;
pub use logger::init_tracing;
pub use state::AppState;

use routes::{contact_handler, github_repos_handler, github_stats_handler, github_user_handler};

/// Contact bodies are small; anything larger is rejected before parsing.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Builds the API router. Non-API paths are served from `static_dir` when given.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/api/contact", post(contact_handler))
        .route("/api/github/{username}", get(github_user_handler))
        .route("/api/github/{username}/repos", get(github_repos_handler))
        .route("/api/github/{username}/stats", get(github_stats_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match static_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Serving static files");
            app.fallback_service(ServeDir::new(dir))
        }
        None => app,
    }
}

/// Opens the store, binds the listener and serves until Ctrl+C / SIGTERM.
pub async fn start_server(config: AppConfig) -> anyhow::Result<()> {
    info!("Initializing state...");
    let state = AppState::from_config(&config).await?;

    info!("Starting server...");
    let app = build_router(state, config.static_dir.as_deref());

    let address = config.bind_address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    serve(listener, app, shutdown_signal()).await
}

/// Serves `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

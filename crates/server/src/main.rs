//! Driftwood Estimates server.
//!
//! Serves the estimate-building API: login, catalog search, per-session
//! carts, PDF estimate generation, and user administration.

#![cfg_attr(not(test), forbid(unsafe_code))]

use driftwood_server::config::ServerConfig;
use driftwood_server::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "driftwood_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new(config.clone()).expect("Failed to initialize application state");

    // Probe the catalog once so misconfiguration shows up at startup
    // rather than on the first search.
    match state.catalog().load() {
        Ok(catalog) => {
            if catalog.price_column().is_none() {
                tracing::warn!(
                    path = %config.catalog_path.display(),
                    "no price column resolved; all unit prices default to 0.00"
                );
            }
        }
        Err(e) => {
            tracing::warn!(
                path = %config.catalog_path.display(),
                error = %e,
                "catalog not loadable at startup; searches will return 503 until fixed"
            );
        }
    }

    let app = driftwood_server::app(state);

    let addr = config.socket_addr();
    tracing::info!("driftwood server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
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
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

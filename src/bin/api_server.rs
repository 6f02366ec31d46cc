// API Server Binary Entry Point
//
// Purpose: Start the Axum API server over the GRI assessment engine
// Usage: cargo run --features api --bin api_server

use gri_assessment::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "gri_assessment=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = ServerConfig::from_env();
    config.log_summary();

    tracing::info!("Initializing application state...");
    let state = AppState::new(config.clone()).await?;
    tracing::info!("Application state initialized successfully");

    let persister = state.persister.clone();
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // write pending edits that are still inside the debounce window
    match persister.flush() {
        Ok(true) => tracing::info!("Flushed unsaved form state"),
        Ok(false) => {}
        Err(e) => tracing::warn!("Final flush failed: {}", e),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}

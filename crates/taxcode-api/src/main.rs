//! # taxcode-api: Binary Entry Point
//!
//! Starts the Axum HTTP server. Configuration comes from the environment:
//! `PORT` (default 8080), `PLACES_CSV`, `VERIFY_CHECKSUM` and `RUST_LOG`.

use taxcode_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!(?config, "starting tax code API");

    let state = AppState::try_with_config(config).map_err(|e| {
        tracing::error!("Place registry initialization failed: {e}");
        e
    })?;
    tracing::info!(places = state.registry.len(), "place registry ready");

    let port = state.config.port;
    let app = taxcode_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Tax code API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

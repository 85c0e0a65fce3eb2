//! # dilemma-api - Binary Entry Point
//!
//! Seeds the case registry and serves the decision and appeal contracts.
//! Binds to configurable port (default 8080).

use dilemma_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {e}");
        e
    })?;
    let port = config.port;

    if let Some(seed) = config.rng_seed {
        tracing::warn!(seed, "deterministic draws enabled");
    }

    let state = AppState::with_config(config);
    tracing::info!(cases = state.registry.len(), "case registry seeded");

    let app = dilemma_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server started, listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

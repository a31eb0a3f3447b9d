mod asr;
mod config;
mod error;
mod extract;
mod ocr;
mod routes;
mod state;
mod translate;
mod upload;

#[cfg(test)]
mod testing;

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bhasha_backend=debug,tower_http=debug")),
        )
        .init();

    let (config, loaded_path) = Config::discover()?;
    match loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No configuration file found, using defaults"),
    }
    if config.speech.api_key.is_none() {
        warn!("No speech API key configured; /voice_translate will fail");
    }

    // Ensure the upload directory exists before accepting requests
    std::fs::create_dir_all(&config.server.upload_dir)?;
    info!("Storing uploads in {}", config.server.upload_dir);

    let app_state = AppState::new(config.clone());

    let app = Router::new()
        .merge(routes::create_routes(app_state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

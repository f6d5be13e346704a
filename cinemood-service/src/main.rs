use std::sync::Arc;

use anyhow::Result;
use cinemood_flows::{Config, OpenRouterInference, TmdbPosterClient};
use cinemood_service::{create_app, AppState};
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState {
        inference: Arc::new(OpenRouterInference::from_config(&config)),
        posters: Arc::new(TmdbPosterClient::new(
            config.tmdb_api_key.clone(),
            config.tmdb_base_url.clone(),
        )),
    };

    let app = create_app(state);
    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    let addr = listener.local_addr()?;

    info!("CineMood service starting on {}", addr);
    info!("Available endpoints:");
    info!("  GET  /health     - Health check");
    info!("  GET  /options    - Emotion, language, and genre options");
    info!("  POST /emotion    - Detect emotion from a webcam frame");
    info!("  POST /recommend  - Recommend movies with poster art");

    axum::serve(listener, app).await?;

    Ok(())
}

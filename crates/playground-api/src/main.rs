//! Story playground API server entry point.

use std::error::Error;
use std::sync::Arc;

use playground_api::config::ApiConfig;
use playground_api::routes;
use playground_api::state::AppState;
use playground_core::clock::SystemClock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting story playground API server");

    // Read configuration from environment.
    let config = ApiConfig::from_env()?;
    let addr = config.socket_addr()?;

    // Build application state.
    let app_state = AppState::new(Arc::new(SystemClock), config);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with the embedding host's origin.
    let app = routes::api_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}

pub mod handlers;
mod types;

pub use types::{ErrorResponse, GenerateRequest, GenerateResponse};

use crate::{Result, config::Config, provider::ReplicateClient};
use axum::{Router, routing::any};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// The handler owns the method gate (custom 405 body, OPTIONS preflight with
/// fixed CORS headers), so the route accepts any method.
pub fn router(state: handlers::AppState) -> Router {
    Router::new()
        .route("/", any(handlers::generate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    if config.api_token.is_none() {
        warn!("REPLICATE_API_TOKEN is not set; generation requests will return 500");
    }

    let provider = ReplicateClient::new(
        config.replicate.clone(),
        config.api_token.clone().unwrap_or_default(),
    )?;

    let app_state = handlers::AppState {
        api_token: config.api_token.clone(),
        provider: Arc::new(provider),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

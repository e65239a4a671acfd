use axum::http::{header::HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;
use crate::ws::handler as ws_handler;

/// Build the full axum Router with all routes and middleware.
///
/// CORS is restricted to the single configured browser origin, mirroring the
/// one-origin posture of the original deployment.
pub fn build_router(state: AppState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true);

    // WebSocket endpoint (no auth; identity arrives via join_user)
    let ws_routes = Router::new().route("/ws", axum::routing::get(ws_handler::ws_upgrade));

    // Liveness + health
    let liveness = Router::new()
        .route("/", axum::routing::get(liveness_check))
        .route("/health", axum::routing::get(health_check));

    Router::new()
        .merge(ws_routes)
        .merge(liveness)
        .layer(cors)
        .with_state(state)
}

/// Liveness endpoint; the static body is part of the external contract.
async fn liveness_check() -> &'static str {
    "Server is running!"
}

/// Basic health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

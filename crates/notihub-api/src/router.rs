//! Route definitions for the NotiHub HTTP API.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/notify", post(handlers::notify::submit))
        .route("/health", get(handlers::health::health));

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

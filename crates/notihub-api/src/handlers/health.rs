//! Health check handler.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
        connections: state.realtime.registry.connection_count(),
        journal_entries: state.journal.len(),
        metrics: state.realtime.metrics.snapshot(),
    })
}

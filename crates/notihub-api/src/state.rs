//! Application state shared across all handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use notihub_core::config::AppConfig;
use notihub_journal::JournalStore;
use notihub_realtime::RealtimeEngine;
use notihub_service::IngestionGate;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Accepted identifier journal
    pub journal: Arc<JournalStore>,
    /// WebSocket realtime engine
    pub realtime: Arc<RealtimeEngine>,
    /// Producer ingestion gate
    pub ingest: Arc<IngestionGate>,
    /// Process start time
    pub started_at: DateTime<Utc>,
}

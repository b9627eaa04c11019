//! Server bootstrap: wires journal, realtime engine, and ingestion gate
//! into an Axum app and runs it until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use notihub_core::config::AppConfig;
use notihub_core::error::AppError;
use notihub_journal::{FileJournalBackend, JournalStore};
use notihub_realtime::{HubMetrics, RealtimeEngine};
use notihub_service::{IngestionGate, SharedSecret};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared application state.
///
/// The journal is loaded from `config.journal.path`. A missing or
/// unreadable journal starts empty; it never prevents startup.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let backend = Arc::new(FileJournalBackend::new(&config.journal.path));
    let journal = Arc::new(JournalStore::load(backend).await);

    let metrics = Arc::new(HubMetrics::new());
    let realtime = Arc::new(RealtimeEngine::new(&config.realtime, metrics.clone()));

    let secret = SharedSecret::new(config.auth.shared_secret.clone());
    if !secret.is_enforced() {
        tracing::warn!("No shared secret configured, producer endpoint is open");
    }

    let ingest = Arc::new(IngestionGate::new(
        journal.clone(),
        realtime.dispatcher.clone(),
        secret,
        metrics,
    ));

    Ok(AppState {
        config: Arc::new(config),
        journal,
        realtime,
        ingest,
        started_at: Utc::now(),
    })
}

/// Runs the NotiHub server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting NotiHub server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = build_state(config).await?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    let monitor = state.realtime.start();
    let realtime = state.realtime.clone();
    let journal = state.journal.clone();

    tracing::info!("NotiHub server listening on {}", addr);

    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            if let Err(e) = journal.persist().await {
                tracing::error!(error = %e, "Final journal flush failed");
            }
            // Open WebSockets would otherwise hold graceful shutdown forever.
            realtime.shutdown();
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if tokio::time::timeout(grace, monitor).await.is_err() {
        tracing::warn!("Liveness monitor did not stop within the grace period");
    }

    tracing::info!("NotiHub server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

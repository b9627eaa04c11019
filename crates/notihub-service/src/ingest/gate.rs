//! The ingestion gate: the only path by which an event reaches listeners.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use notihub_core::error::AppError;
use notihub_core::types::EventRecord;
use notihub_journal::JournalStore;
use notihub_realtime::{BroadcastDispatcher, HubMetrics};

use super::auth::SharedSecret;

/// What happened to a submitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// `false` when the identifier was already in the journal.
    pub accepted: bool,
    /// Connections delivery was attempted to (0 for duplicates).
    pub delivered: usize,
}

impl SubmitOutcome {
    /// A duplicate submission; idempotent success.
    pub fn ignored() -> Self {
        Self {
            accepted: false,
            delivered: 0,
        }
    }
}

/// Authorizes, validates, dedups, and dispatches producer events.
#[derive(Debug)]
pub struct IngestionGate {
    /// Accepted identifier ledger.
    journal: Arc<JournalStore>,
    /// Fan-out to listeners.
    dispatcher: Arc<BroadcastDispatcher>,
    /// Producer secret.
    secret: SharedSecret,
    /// Metrics.
    metrics: Arc<HubMetrics>,
}

impl IngestionGate {
    /// Creates a new ingestion gate.
    pub fn new(
        journal: Arc<JournalStore>,
        dispatcher: Arc<BroadcastDispatcher>,
        secret: SharedSecret,
        metrics: Arc<HubMetrics>,
    ) -> Self {
        Self {
            journal,
            dispatcher,
            secret,
            metrics,
        }
    }

    /// Submits one event.
    ///
    /// The identifier is in the journal before any broadcast starts. A
    /// known identifier is reported as ignored, never as an error. Journal
    /// write failures and per-listener delivery failures are logged and do
    /// not fail the submission.
    pub async fn submit(
        &self,
        auth_token: Option<&str>,
        record: EventRecord,
    ) -> Result<SubmitOutcome, AppError> {
        if !self.authorize(auth_token) {
            warn!(trx = %record.id, "Rejected submission with bad shared secret");
            return Err(AppError::unauthorized("Invalid or missing shared secret"));
        }

        record.validate()?;

        let accepted = self.journal.accept(&record.id);
        self.metrics.event_ingested(accepted);

        if !accepted {
            info!(trx = %record.id, "Duplicate event ignored");
            return Ok(SubmitOutcome::ignored());
        }

        if let Err(e) = self.journal.persist().await {
            self.metrics.persist_failed();
            warn!(
                trx = %record.id,
                error = %e,
                "Journal persist failed, dedup continues in memory only"
            );
        }

        let delivered = self.dispatcher.dispatch(&record)?;

        info!(trx = %record.id, delivered, "Event accepted and broadcast");

        Ok(SubmitOutcome {
            accepted: true,
            delivered,
        })
    }

    /// Checks a producer credential against the configured secret.
    pub fn authorize(&self, auth_token: Option<&str>) -> bool {
        self.secret.verify(auth_token)
    }

    /// The journal backing this gate.
    pub fn journal(&self) -> &Arc<JournalStore> {
        &self.journal
    }
}

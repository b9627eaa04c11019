//! Response DTOs.

use serde::{Deserialize, Serialize};

use notihub_realtime::metrics::MetricsSnapshot;
use notihub_service::SubmitOutcome;

/// Response to a producer submission.
///
/// Broadcast: `{ok: true, sent: n}`. Duplicate: `{ok: true, ignored: true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyResponse {
    /// Always `true` on success.
    pub ok: bool,
    /// Connections the event was sent to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent: Option<usize>,
    /// Set when the identifier was already known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignored: Option<bool>,
}

impl From<SubmitOutcome> for NotifyResponse {
    fn from(outcome: SubmitOutcome) -> Self {
        if outcome.accepted {
            Self {
                ok: true,
                sent: Some(outcome.delivered),
                ignored: None,
            }
        } else {
            Self {
                ok: true,
                sent: None,
                ignored: Some(true),
            }
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `true` while the process serves requests.
    pub ok: bool,
    /// Status string.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the hub started.
    pub uptime_seconds: i64,
    /// Currently registered listener connections.
    pub connections: usize,
    /// Identifiers in the journal.
    pub journal_entries: usize,
    /// Lifetime counters.
    pub metrics: MetricsSnapshot,
}

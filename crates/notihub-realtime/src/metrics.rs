//! Hub-level counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Process-lifetime counters shared by the registry, monitor, and gate.
#[derive(Debug, Default)]
pub struct HubMetrics {
    /// Connections ever registered
    pub connections_total: AtomicU64,
    /// Connections evicted by the liveness monitor
    pub connections_evicted: AtomicU64,
    /// Events accepted into the journal
    pub events_accepted: AtomicU64,
    /// Submissions ignored as duplicates
    pub events_duplicate: AtomicU64,
    /// Frames queued to listeners
    pub messages_sent: AtomicU64,
    /// Per-connection send failures
    pub send_failures: AtomicU64,
    /// Journal writes that failed
    pub persist_failures: AtomicU64,
}

impl HubMetrics {
    /// Create zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new connection
    pub fn connection_opened(&self) {
        self.connections_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an eviction
    pub fn connection_evicted(&self) {
        self.connections_evicted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an ingestion outcome
    pub fn event_ingested(&self, accepted: bool) {
        if accepted {
            self.events_accepted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.events_duplicate.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record queued frames
    pub fn messages_sent(&self, count: u64) {
        self.messages_sent.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a failed send
    pub fn send_failed(&self) {
        self.send_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed journal write
    pub fn persist_failed(&self) {
        self.persist_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_total: self.connections_total.load(Ordering::Relaxed),
            connections_evicted: self.connections_evicted.load(Ordering::Relaxed),
            events_accepted: self.events_accepted.load(Ordering::Relaxed),
            events_duplicate: self.events_duplicate.load(Ordering::Relaxed),
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
            persist_failures: self.persist_failures.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Connections ever registered
    pub connections_total: u64,
    /// Connections evicted by the liveness monitor
    pub connections_evicted: u64,
    /// Events accepted into the journal
    pub events_accepted: u64,
    /// Submissions ignored as duplicates
    pub events_duplicate: u64,
    /// Frames queued to listeners
    pub messages_sent: u64,
    /// Per-connection send failures
    pub send_failures: u64,
    /// Journal writes that failed
    pub persist_failures: u64,
}

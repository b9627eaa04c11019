//! Broadcast dispatcher. Serializes an accepted event once and queues it
//! for every open listener.

use std::sync::Arc;

use tracing::{debug, warn};

use notihub_core::result::AppResult;
use notihub_core::types::EventRecord;

use crate::connection::registry::ConnectionRegistry;
use crate::message::types::{OutboundFrame, OutboundMessage};
use crate::metrics::HubMetrics;

/// Fans accepted events out to the registry.
#[derive(Debug)]
pub struct BroadcastDispatcher {
    /// Connection registry to enumerate.
    registry: Arc<ConnectionRegistry>,
    /// Metrics.
    metrics: Arc<HubMetrics>,
}

impl BroadcastDispatcher {
    /// Create a new dispatcher
    pub fn new(registry: Arc<ConnectionRegistry>, metrics: Arc<HubMetrics>) -> Self {
        Self { registry, metrics }
    }

    /// Broadcast a notification for `record`.
    ///
    /// Returns the number of connections delivery was attempted to.
    pub fn dispatch(&self, record: &EventRecord) -> AppResult<usize> {
        let payload = serde_json::to_string(&OutboundMessage::Notification(record.clone()))?;
        let attempted = self.dispatch_payload(Arc::from(payload));

        debug!(trx = %record.id, attempted, "Notification broadcast");
        Ok(attempted)
    }

    /// Queue a pre-serialized payload for every open connection.
    ///
    /// Delivery is fire-and-forget: a failing connection is logged and
    /// skipped, it never stops delivery to the others.
    pub fn dispatch_payload(&self, payload: Arc<str>) -> usize {
        let mut queued = 0u64;

        let attempted = self.registry.for_each_open(|conn| {
            match conn.send(OutboundFrame::Text(payload.clone())) {
                Ok(()) => queued += 1,
                Err(e) => {
                    warn!(conn_id = %conn.id, error = %e, "Failed to deliver notification");
                    self.metrics.send_failed();
                }
            }
        });

        self.metrics.messages_sent(queued);
        attempted
    }
}

//! Connection registry owning every open listener connection.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

use notihub_core::types::ConnectionId;

use crate::message::types::{InboundMessage, OutboundFrame};
use crate::metrics::HubMetrics;

use super::handle::ConnectionHandle;

/// Transport-level events reported by a connection's socket task.
///
/// Every lifecycle change after registration funnels through
/// [`ConnectionRegistry::handle_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// A text frame arrived from the listener.
    Text(String),
    /// The listener answered a liveness probe.
    Pong,
    /// The transport closed or errored.
    Closed,
}

/// Thread-safe registry of open listener connections.
#[derive(Debug)]
pub struct ConnectionRegistry {
    /// Connection ID → handle.
    connections: DashMap<ConnectionId, Arc<ConnectionHandle>>,
    /// Outbound buffer size per connection.
    buffer_size: usize,
    /// Metrics.
    metrics: Arc<HubMetrics>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new(buffer_size: usize, metrics: Arc<HubMetrics>) -> Self {
        Self {
            connections: DashMap::new(),
            buffer_size: buffer_size.max(1),
            metrics,
        }
    }

    /// Registers a newly accepted connection with `alive = true`.
    ///
    /// Returns the handle and the receiver the transport writer drains.
    pub fn register(&self) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundFrame>) {
        let (tx, rx) = mpsc::channel(self.buffer_size);
        let handle = Arc::new(ConnectionHandle::new(tx));

        self.connections.insert(handle.id, handle.clone());
        self.metrics.connection_opened();

        info!(
            conn_id = %handle.id,
            connections = self.connections.len(),
            "Listener connection registered"
        );

        (handle, rx)
    }

    /// Removes a connection. Removing an absent connection is a no-op.
    pub fn unregister(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        let (_, handle) = self.connections.remove(conn_id)?;
        handle.terminate();

        info!(
            conn_id = %conn_id,
            connections = self.connections.len(),
            "Listener connection unregistered"
        );

        Some(handle)
    }

    /// Invokes `f` for every registered connection whose transport is open.
    ///
    /// `f` runs while the registry shard holding that connection is
    /// read-locked, so a concurrent `unregister` of the same connection
    /// cannot complete mid-visit. `f` must not call back into the registry.
    /// Returns the number of connections visited.
    pub fn for_each_open<F>(&self, mut f: F) -> usize
    where
        F: FnMut(&Arc<ConnectionHandle>),
    {
        let mut visited = 0;
        for entry in self.connections.iter() {
            let handle = entry.value();
            if handle.is_open() {
                f(handle);
                visited += 1;
            }
        }
        visited
    }

    /// Records the advisory resumption token sent at handshake.
    pub fn on_handshake(&self, conn_id: &ConnectionId, resume_from: Option<String>) {
        if let Some(handle) = self.get(conn_id) {
            debug!(
                conn_id = %conn_id,
                resume_from = ?resume_from,
                "Listener handshake"
            );
            handle.set_resume_from(resume_from);
        }
    }

    /// Single entry point for transport events.
    pub fn handle_event(&self, conn_id: &ConnectionId, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Text(raw) => match serde_json::from_str::<InboundMessage>(&raw) {
                Ok(InboundMessage::Hello { last_trx }) => self.on_handshake(conn_id, last_trx),
                Err(e) => {
                    debug!(conn_id = %conn_id, error = %e, "Ignoring unrecognized listener message");
                }
            },
            ConnectionEvent::Pong => {
                if let Some(handle) = self.get(conn_id) {
                    handle.mark_alive();
                }
            }
            ConnectionEvent::Closed => {
                self.unregister(conn_id);
            }
        }
    }

    /// Gets a specific connection by ID.
    pub fn get(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections.get(conn_id).map(|entry| entry.value().clone())
    }

    /// Returns all connection handles.
    pub fn all_connections(&self) -> Vec<Arc<ConnectionHandle>> {
        self.connections
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Returns the number of registered connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Terminates and removes every connection.
    pub fn close_all(&self) -> usize {
        let all = self.all_connections();
        for conn in &all {
            self.unregister(&conn.id);
        }
        info!(count = all.len(), "All listener connections closed");
        all.len()
    }
}

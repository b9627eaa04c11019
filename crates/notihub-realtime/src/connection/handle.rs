//! Individual listener connection handle.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use notihub_core::types::ConnectionId;

use crate::message::types::OutboundFrame;

/// Why a frame could not be queued for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The connection has been closed or evicted.
    #[error("connection closed")]
    Closed,
    /// The outbound buffer is full; the frame was dropped.
    #[error("send buffer full")]
    BufferFull,
}

/// A handle to a single listener connection.
///
/// Holds the sender channel feeding the transport writer, the liveness
/// flag driven by the probe cycle, and the advisory handshake token.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// When the connection was established
    pub connected_at: DateTime<Utc>,
    /// Sender for outbound frames
    sender: mpsc::Sender<OutboundFrame>,
    /// Cancelled when the hub terminates the transport
    terminate: CancellationToken,
    /// Cleared when a probe is sent, set again on pong
    alive: AtomicBool,
    /// Set once the connection leaves the registry
    closed: AtomicBool,
    /// Last event the listener claims to have (from `hello`)
    resume_from: Mutex<Option<String>>,
}

impl ConnectionHandle {
    /// Create a new connection handle
    pub fn new(sender: mpsc::Sender<OutboundFrame>) -> Self {
        Self {
            id: ConnectionId::new(),
            connected_at: Utc::now(),
            sender,
            terminate: CancellationToken::new(),
            alive: AtomicBool::new(true),
            closed: AtomicBool::new(false),
            resume_from: Mutex::new(None),
        }
    }

    /// Queue a frame for this connection without waiting.
    pub fn send(&self, frame: OutboundFrame) -> Result<(), DeliveryError> {
        if !self.is_open() {
            return Err(DeliveryError::Closed);
        }
        match self.sender.try_send(frame) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => Err(DeliveryError::BufferFull),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(DeliveryError::Closed),
        }
    }

    /// Whether the transport is still open
    pub fn is_open(&self) -> bool {
        !self.closed.load(Ordering::SeqCst) && !self.sender.is_closed()
    }

    /// Current liveness flag
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Record a probe acknowledgment
    pub fn mark_alive(&self) {
        self.alive.store(true, Ordering::SeqCst);
    }

    /// Clear the liveness flag ahead of a probe.
    ///
    /// Returns the previous value: `false` means the last probe was never
    /// answered.
    pub fn begin_probe(&self) -> bool {
        self.alive.swap(false, Ordering::SeqCst)
    }

    /// Mark the connection closed and signal the transport to shut down.
    pub fn terminate(&self) {
        self.closed.store(true, Ordering::SeqCst);
        let _ = self.sender.try_send(OutboundFrame::Close);
        self.terminate.cancel();
    }

    /// Token cancelled when the hub terminates this connection.
    pub fn termination(&self) -> CancellationToken {
        self.terminate.clone()
    }

    /// Record the advisory resumption token from a handshake
    pub fn set_resume_from(&self, last_trx: Option<String>) {
        *self.resume_from.lock().unwrap_or_else(|e| e.into_inner()) = last_trx;
    }

    /// Advisory resumption token, if the listener sent one
    pub fn resume_from(&self) -> Option<String> {
        self.resume_from
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Get a snapshot of connection info
    pub fn info(&self) -> ConnectionInfo {
        ConnectionInfo {
            id: self.id,
            connected_at: self.connected_at,
            alive: self.is_alive(),
            open: self.is_open(),
            resume_from: self.resume_from(),
        }
    }
}

/// Snapshot of connection info (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionInfo {
    /// Connection ID
    pub id: ConnectionId,
    /// Connected at
    pub connected_at: DateTime<Utc>,
    /// Liveness flag
    pub alive: bool,
    /// Transport open
    pub open: bool,
    /// Handshake token
    pub resume_from: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_cycle() {
        let (tx, _rx) = mpsc::channel(4);
        let handle = ConnectionHandle::new(tx);

        assert!(handle.is_alive());
        assert!(handle.begin_probe());
        assert!(!handle.is_alive());
        assert!(!handle.begin_probe());
        handle.mark_alive();
        assert!(handle.begin_probe());
    }

    #[tokio::test]
    async fn test_send_after_terminate_fails() {
        let (tx, mut rx) = mpsc::channel(4);
        let handle = ConnectionHandle::new(tx);
        let token = handle.termination();

        handle.send(OutboundFrame::Ping).unwrap();
        handle.terminate();

        assert!(token.is_cancelled());
        assert!(!handle.is_open());
        assert_eq!(handle.send(OutboundFrame::Ping), Err(DeliveryError::Closed));
        assert_eq!(rx.recv().await, Some(OutboundFrame::Ping));
        assert_eq!(rx.recv().await, Some(OutboundFrame::Close));
    }

    #[tokio::test]
    async fn test_full_buffer_and_dropped_receiver() {
        let (tx, rx) = mpsc::channel(1);
        let handle = ConnectionHandle::new(tx);

        handle.send(OutboundFrame::Ping).unwrap();
        assert_eq!(
            handle.send(OutboundFrame::Ping),
            Err(DeliveryError::BufferFull)
        );

        drop(rx);
        assert!(!handle.is_open());
        assert_eq!(handle.send(OutboundFrame::Ping), Err(DeliveryError::Closed));
    }
}

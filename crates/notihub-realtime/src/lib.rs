//! # notihub-realtime
//!
//! Real-time side of NotiHub. Provides:
//!
//! - The registry of open listener connections and their liveness state
//! - Periodic Ping/Pong liveness probing with eviction of silent listeners
//! - Broadcast fan-out of accepted events to every open listener
//!
//! Transport framing lives in the API crate; this crate only sees
//! [`message::OutboundFrame`]s going out and
//! [`connection::ConnectionEvent`]s coming in.

pub mod broadcast;
pub mod connection;
pub mod message;
pub mod metrics;
pub mod server;

pub use broadcast::dispatcher::BroadcastDispatcher;
pub use connection::heartbeat::LivenessMonitor;
pub use connection::registry::ConnectionRegistry;
pub use metrics::HubMetrics;
pub use server::RealtimeEngine;

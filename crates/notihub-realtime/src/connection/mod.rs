//! Listener connection management: handles, registry, liveness probing.

pub mod handle;
pub mod heartbeat;
pub mod registry;

pub use handle::{ConnectionHandle, DeliveryError};
pub use registry::{ConnectionEvent, ConnectionRegistry};

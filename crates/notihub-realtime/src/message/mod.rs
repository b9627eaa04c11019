//! WebSocket message definitions.

pub mod types;

pub use types::{InboundMessage, OutboundFrame, OutboundMessage};

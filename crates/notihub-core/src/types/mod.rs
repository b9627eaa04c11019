//! Core type definitions used across the NotiHub workspace.

pub mod event;
pub mod id;

pub use event::EventRecord;
pub use id::ConnectionId;

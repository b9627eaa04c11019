//! Fan-out of accepted events to listeners.

pub mod dispatcher;

pub use dispatcher::BroadcastDispatcher;

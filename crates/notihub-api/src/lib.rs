//! # notihub-api
//!
//! HTTP API layer for NotiHub built on Axum.
//!
//! Provides the producer ingestion endpoint, the listener WebSocket
//! upgrade, a health endpoint, error mapping, and the server bootstrap
//! shared by the server binary and the CLI.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use router::build_router;
pub use state::AppState;

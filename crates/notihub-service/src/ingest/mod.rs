//! Event ingestion: authorization, validation, dedup, dispatch.

pub mod auth;
pub mod gate;

pub use auth::SharedSecret;
pub use gate::{IngestionGate, SubmitOutcome};

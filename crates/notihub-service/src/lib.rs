//! # notihub-service
//!
//! Ingestion use case for NotiHub. The [`IngestionGate`] checks the
//! producer's shared secret, validates the event, records it in the
//! journal, and hands newly accepted events to the broadcast dispatcher.
//!
//! Dependencies are provided at construction time via `Arc` references.

pub mod ingest;

pub use ingest::{IngestionGate, SharedSecret, SubmitOutcome};

//! # notihub-core
//!
//! Core crate for NotiHub. Contains configuration schemas, the event
//! record exchanged between producers and listeners, typed identifiers,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other NotiHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

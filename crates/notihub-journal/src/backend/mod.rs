//! Persistence backends for the journal.

pub mod file;
pub mod memory;

use async_trait::async_trait;

use crate::error::JournalError;

/// Durable storage for the ordered list of accepted identifiers.
///
/// Implementations only move whole snapshots; membership logic lives in
/// [`crate::JournalStore`].
#[async_trait]
pub trait JournalBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend type name (e.g. `"file"`, `"memory"`).
    fn backend_type(&self) -> &str;

    /// Read the persisted identifiers. `Ok(None)` means nothing has been
    /// persisted yet.
    async fn read(&self) -> Result<Option<Vec<String>>, JournalError>;

    /// Replace the persisted identifiers with `ids`.
    async fn write(&self, ids: &[String]) -> Result<(), JournalError>;
}

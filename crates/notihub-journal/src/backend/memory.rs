//! In-memory journal backend.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use super::JournalBackend;
use crate::error::JournalError;

/// Keeps the "persisted" snapshot in memory.
///
/// Writes can be made to fail on demand, which is how storage
/// degradation is exercised without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryJournalBackend {
    /// Last written snapshot.
    snapshot: Mutex<Option<Vec<String>>>,
    /// When set, every read and write fails.
    failing: AtomicBool,
    /// Number of successful writes.
    writes: AtomicUsize,
}

impl MemoryJournalBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-seeded with a persisted snapshot.
    pub fn with_snapshot(ids: Vec<String>) -> Self {
        Self {
            snapshot: Mutex::new(Some(ids)),
            ..Self::default()
        }
    }

    /// Toggle failure injection.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current persisted snapshot.
    pub fn persisted(&self) -> Option<Vec<String>> {
        self.snapshot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn check(&self) -> Result<(), JournalError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(JournalError::Unavailable("injected failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl JournalBackend for MemoryJournalBackend {
    fn backend_type(&self) -> &str {
        "memory"
    }

    async fn read(&self) -> Result<Option<Vec<String>>, JournalError> {
        self.check()?;
        Ok(self.persisted())
    }

    async fn write(&self, ids: &[String]) -> Result<(), JournalError> {
        self.check()?;
        *self.snapshot.lock().unwrap_or_else(|e| e.into_inner()) = Some(ids.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

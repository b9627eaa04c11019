//! The journal store: atomic dedup decisions over a durable identifier set.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::backend::JournalBackend;
use crate::error::JournalError;

/// In-memory view of the journal.
#[derive(Debug, Default)]
struct JournalState {
    /// Membership index.
    ids: HashSet<String>,
    /// Insertion order, as written to disk.
    order: Vec<String>,
}

impl JournalState {
    fn insert(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.to_string());
        self.order.push(id.to_string());
        true
    }
}

/// Process-wide set of accepted event identifiers.
///
/// Identifiers are never removed. The in-memory set is authoritative for
/// the lifetime of the process; the backend only matters across restarts.
#[derive(Debug)]
pub struct JournalStore {
    /// Identifier set guarded for atomic check-and-insert.
    state: Mutex<JournalState>,
    /// Durable storage.
    backend: Arc<dyn JournalBackend>,
    /// Serializes `persist` so an older snapshot never lands after a newer one.
    persist_lock: tokio::sync::Mutex<()>,
}

impl JournalStore {
    /// Load the journal from `backend`.
    ///
    /// A missing, unreadable, or malformed journal yields an empty set;
    /// the condition is logged and startup continues.
    pub async fn load(backend: Arc<dyn JournalBackend>) -> Self {
        let mut state = JournalState::default();

        match backend.read().await {
            Ok(Some(ids)) => {
                for id in &ids {
                    state.insert(id);
                }
                info!(
                    backend = backend.backend_type(),
                    entries = state.order.len(),
                    "Journal loaded"
                );
            }
            Ok(None) => {
                info!(
                    backend = backend.backend_type(),
                    "No journal found, starting empty"
                );
            }
            Err(e) => {
                warn!(
                    backend = backend.backend_type(),
                    error = %e,
                    "Journal unreadable, starting empty"
                );
            }
        }

        Self {
            state: Mutex::new(state),
            backend,
            persist_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Whether `id` has been accepted before.
    pub fn contains(&self, id: &str) -> bool {
        self.lock().ids.contains(id)
    }

    /// Atomically record `id`.
    ///
    /// Returns `true` if the identifier was new, `false` if it was already
    /// present (in which case nothing changes).
    pub fn accept(&self, id: &str) -> bool {
        self.lock().insert(id)
    }

    /// Write the full current set to the backend, overwriting prior content.
    ///
    /// Returns the number of identifiers written. A failure leaves the
    /// in-memory set untouched.
    pub async fn persist(&self) -> Result<usize, JournalError> {
        let _guard = self.persist_lock.lock().await;
        let snapshot = self.snapshot();
        self.backend.write(&snapshot).await?;
        debug!(entries = snapshot.len(), "Journal persisted");
        Ok(snapshot.len())
    }

    /// Number of accepted identifiers.
    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    /// Whether nothing has been accepted yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identifiers in insertion order.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().order.clone()
    }

    /// The persistence backend.
    pub fn backend(&self) -> &Arc<dyn JournalBackend> {
        &self.backend
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, JournalState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

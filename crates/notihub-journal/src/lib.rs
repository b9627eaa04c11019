//! # notihub-journal
//!
//! The dedup ledger of NotiHub: a process-wide set of accepted event
//! identifiers, loaded once at startup and rewritten in full whenever a
//! new identifier is accepted.
//!
//! - [`JournalStore`] owns the in-memory set and the atomic
//!   check-and-insert used by ingestion.
//! - [`JournalBackend`] abstracts where the set is persisted; the
//!   [`FileJournalBackend`] writes a JSON array via temp-file + rename.

pub mod backend;
pub mod error;
pub mod store;

pub use backend::JournalBackend;
pub use backend::file::FileJournalBackend;
pub use backend::memory::MemoryJournalBackend;
pub use error::JournalError;
pub use store::JournalStore;

//! Journal error types.

use thiserror::Error;

use notihub_core::error::{AppError, ErrorKind};

/// Errors raised while reading or writing the persisted journal.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Underlying I/O failure.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// File involved.
        path: String,
        /// Cause.
        #[source]
        source: std::io::Error,
    },

    /// The persisted content is not a JSON array of strings.
    #[error("Malformed journal: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The backend refused the operation.
    #[error("Journal backend unavailable: {0}")]
    Unavailable(String),
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        AppError::with_source(ErrorKind::Storage, format!("Journal error: {err}"), err)
    }
}

//! Local filesystem journal backend.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::JournalBackend;
use crate::error::JournalError;

/// Stores the journal as a JSON array in a single file.
///
/// Writes go to a sibling `*.tmp` file which is then renamed over the
/// journal, so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileJournalBackend {
    /// Journal file path.
    path: PathBuf,
}

impl FileJournalBackend {
    /// Create a backend for the given journal path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The journal file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "journal".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(path: &Path, source: std::io::Error) -> JournalError {
        JournalError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl JournalBackend for FileJournalBackend {
    fn backend_type(&self) -> &str {
        "file"
    }

    async fn read(&self) -> Result<Option<Vec<String>>, JournalError> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::io_error(&self.path, e)),
        };

        let ids: Vec<String> = serde_json::from_slice(&raw)?;
        Ok(Some(ids))
    }

    async fn write(&self, ids: &[String]) -> Result<(), JournalError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::io_error(parent, e))?;
        }

        let body = serde_json::to_vec(ids)?;
        let tmp = self.temp_path();

        let mut file = fs::File::create(&tmp)
            .await
            .map_err(|e| Self::io_error(&tmp, e))?;
        file.write_all(&body)
            .await
            .map_err(|e| Self::io_error(&tmp, e))?;
        file.sync_all()
            .await
            .map_err(|e| Self::io_error(&tmp, e))?;
        drop(file);

        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| Self::io_error(&self.path, e))?;

        debug!(path = %self.path.display(), entries = ids.len(), "Journal written");
        Ok(())
    }
}

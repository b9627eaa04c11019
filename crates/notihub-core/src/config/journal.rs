//! Dedup journal configuration.

use serde::{Deserialize, Serialize};

/// Where the accepted-identifier journal lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Path of the JSON journal file.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "data/journal.json".to_string()
}

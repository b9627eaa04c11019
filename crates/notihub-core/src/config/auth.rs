//! Producer authentication configuration.

use serde::{Deserialize, Serialize};

/// Shared-secret settings for the ingestion endpoint.
///
/// An empty `shared_secret` puts the hub in accept-all mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret producers must present. Empty disables the check.
    #[serde(default)]
    pub shared_secret: String,
    /// Request header carrying the secret.
    #[serde(default = "default_header_name")]
    pub header_name: String,
}

impl AuthConfig {
    /// Whether a secret is configured.
    pub fn is_enforced(&self) -> bool {
        !self.shared_secret.is_empty()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            shared_secret: String::new(),
            header_name: default_header_name(),
        }
    }
}

fn default_header_name() -> String {
    "x-notify-secret".to_string()
}

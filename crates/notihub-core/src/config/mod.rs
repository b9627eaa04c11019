//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default, so an absent file still
//! yields a runnable (accept-all) hub.

pub mod app;
pub mod auth;
pub mod journal;
pub mod logging;
pub mod realtime;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::journal::JournalConfig;
pub use self::logging::LoggingConfig;
pub use self::realtime::RealtimeConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// (default.toml + environment overlay + `NOTIHUB__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Producer authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Dedup journal settings.
    #[serde(default)]
    pub journal: JournalConfig,
    /// Real-time WebSocket settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// `path` names the base file (extension optional). An overlay named
    /// `config/{env}` is merged on top, followed by environment variables
    /// prefixed with `NOTIHUB__`.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("NOTIHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load configuration from a single file, without overlays or
    /// environment variables. The file must exist.
    pub fn load_file(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

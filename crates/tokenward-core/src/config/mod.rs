//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a serde default so an empty file is a
//! valid configuration.

pub mod auth;
pub mod cache;
pub mod logging;
pub mod picklist;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::auth::AuthConfig;
pub use self::cache::{CacheConfig, MemoryCacheConfig};
pub use self::logging::LoggingConfig;
pub use self::picklist::PicklistConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Token signing and validation settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Protected token storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Cache provider settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Cached picklist settings.
    #[serde(default)]
    pub picklist: PicklistConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, the file at `path` and environment variables
    /// prefixed with `TOKENWARD__` (double underscore separates sections,
    /// e.g. `TOKENWARD__AUTH__ACCESS_SECRET`). Missing files are skipped.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("TOKENWARD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files, `ACCOUNTHUB__*` environment variables, and the bare `PORT`
//! variable. Each sub-module represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, DatabaseProvider};
pub use self::logging::LoggingConfig;
pub use self::storage::{
    CloudinaryStorageConfig, LocalStorageConfig, SignatureAlgorithm, StorageConfig,
    StorageProviderKind,
};

use crate::error::AppError;

/// Root application configuration.
///
/// Built once at startup and shared read-only (behind `Arc`) with every
/// component that needs it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token signing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Media storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Sources, lowest precedence first: `config/default.toml`,
    /// `config/{env}.toml`, `ACCOUNTHUB__SECTION__KEY` variables, and
    /// finally `PORT`, which overrides `server.port`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ACCOUNTHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())
            .map_err(|e| AppError::configuration(format!("Invalid PORT override: {e}")))?
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject configurations that cannot produce a working server.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.access_token_secret.is_empty() || self.auth.refresh_token_secret.is_empty() {
            return Err(AppError::configuration("Token signing secrets must not be empty"));
        }
        if self.auth.access_token_ttl_minutes == 0 || self.auth.refresh_token_ttl_days == 0 {
            return Err(AppError::configuration("Token TTLs must be greater than zero"));
        }
        if self.database.provider == DatabaseProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres provider",
            ));
        }
        Ok(())
    }
}

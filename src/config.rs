//! Storage configuration.
//!
//! Loads [`StorageConfig`] from `config/config.toml` or environment
//! variables prefixed with `CATALOG` (e.g. `CATALOG__DATABASE_PATH`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// SQLite database path; `:memory:` opens a private in-memory store.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    ":memory:".to_string()
}

impl StorageConfig {
    /// Load the storage configuration from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/config.toml").required(false))
            .add_source(Environment::with_prefix("CATALOG").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

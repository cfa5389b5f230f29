//! # Configuration Module
//!
//! Runtime settings read from environment variables (and a `.env` file
//! loaded by the binary beforehand).

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::bot::RenderMode;

// Defaults
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Where tasks are persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process memory; everything is lost on restart
    Memory,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Postgres connection URL, required by the postgres backend
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub store_backend: StoreBackend,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default)]
    pub render_mode: RenderMode,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_db_max_connections() -> u32 {
    DEFAULT_DB_MAX_CONNECTIONS
}

impl AppConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .context("Failed to read configuration from environment")?;

        Self::from_settings(settings)
    }

    /// Deserialize and validate already collected settings
    pub fn from_settings(settings: config::Config) -> Result<Self> {
        let config: AppConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.store_backend == StoreBackend::Postgres && self.database_url.is_none() {
            anyhow::bail!("DATABASE_URL must be set when STORE_BACKEND is postgres");
        }
        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        Ok(())
    }
}

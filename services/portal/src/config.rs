//! services/portal/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The
//! `.env` file is used for local development. Platform settings edited by
//! the admin (name, logo, secondary secret) are a different thing: they live
//! in the config slot of the store, not here.

use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct PortalConfig {
    pub log_level: Level,
    /// Directory holding the persisted slot files. `None` selects the
    /// platform data directory.
    pub data_dir: Option<PathBuf>,
    /// API key for the OpenAI-compatible assistant endpoint. Absent means
    /// the assistant features stay offline.
    pub api_key: Option<String>,
    pub chat_model: String,
    pub description_model: String,
}

impl PortalConfig {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for
    /// development, but this is skipped in test environments to ensure tests
    /// are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let data_dir = std::env::var("PORTAL_DATA_DIR").map(PathBuf::from).ok();

        // --- Load API Key (as optional) and model settings ---
        let api_key = std::env::var("OPENAI_API_KEY").ok();
        let chat_model = std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());
        let description_model =
            std::env::var("DESCRIPTION_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Ok(Self {
            log_level,
            data_dir,
            api_key,
            chat_model,
            description_model,
        })
    }
}

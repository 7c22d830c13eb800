//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    pub openai_api_key: Option<String>,
    pub content_model: String,
    /// Upper bound on a single oracle round trip. There is no retry budget:
    /// a call that misses the deadline degrades to its fallback value.
    pub oracle_timeout: Duration,
    /// Origins the browser frontend may call us from.
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server and Database Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load API Keys (as optional) ---
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();

        // --- Load Adapter-specific Settings ---
        let content_model =
            std::env::var("CONTENT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let oracle_timeout_str =
            std::env::var("ORACLE_TIMEOUT_SECS").unwrap_or_else(|_| "30".to_string());
        let oracle_timeout_secs = oracle_timeout_str.parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(
                "ORACLE_TIMEOUT_SECS".to_string(),
                format!("'{}' is not a number of seconds", oracle_timeout_str),
            )
        })?;
        let oracle_timeout = Duration::from_secs(oracle_timeout_secs);

        let allowed_origins_str = std::env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| {
            "http://localhost:5173,http://127.0.0.1:5173,http://localhost:3000".to_string()
        });
        let allowed_origins = allowed_origins_str
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            openai_api_key,
            content_model,
            oracle_timeout,
            allowed_origins,
        })
    }
}

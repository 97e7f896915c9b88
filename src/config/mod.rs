//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CONSULT_INTAKE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use consult_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod intake;
mod server;
mod storage;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use intake::IntakeConfig;
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Environment prefix for every setting.
pub const ENV_PREFIX: &str = "CONSULT_INTAKE";

/// Plain variables honoured when the prefixed form is absent.
const FALLBACKS: [(&str, &str); 2] = [("GROQ_API_KEY", "ai.api_key"), ("PORT", "server.port")];

/// Root application configuration
///
/// Every section has defaults; load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, transport limits)
    #[serde(default)]
    pub server: ServerConfig,

    /// Text generation backend and report writer budgets
    #[serde(default)]
    pub ai: AiConfig,

    /// Dialogue and completeness tunables
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Session persistence
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Seeds `ai.api_key` from `GROQ_API_KEY` and `server.port` from `PORT`
    /// 3. Reads environment variables with `CONSULT_INTAKE` prefix, which win
    ///    over the plain fallbacks
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CONSULT_INTAKE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CONSULT_INTAKE__INTAKE__CRITERIA=process,tool` -> `intake.criteria = ["process", "tool"]`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        for (var, key) in FALLBACKS {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_default(key, value)?;
            }
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("intake.criteria")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.intake.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

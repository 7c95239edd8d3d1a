//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BUYER_REGISTRY` prefix and nested values use double underscores as separators.
//! The conventional bare `PORT` variable overrides `server.port`.
//!
//! # Example
//!
//! ```no_run
//! use buyer_registry::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Listening on port {}", config.server.port);
//! ```

mod error;
mod server;
mod store;
mod verification;

pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use store::{CacheConfig, StoreConfig};
pub use verification::{VerificationConfig, INSECURE_DEFAULT_SECRET};

use serde::Deserialize;

/// Root application configuration
///
/// Built once at startup and handed to the handlers that need it.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote list document
    pub store: StoreConfig,

    /// Local mirror file
    #[serde(default)]
    pub cache: CacheConfig,

    /// Verification token secret
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `BUYER_REGISTRY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BUYER_REGISTRY__STORE__URL=...` -> `store.url = ...`
    /// - `PORT=8080` -> `server.port = 8080` (takes precedence)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BUYER_REGISTRY")
                    .separator("__"),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
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
        self.store.validate(&self.server.environment)?;
        self.cache.validate()?;
        self.verification.validate(&self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

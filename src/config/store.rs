//! Remote store and local mirror configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Remote list document configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Document URL (GET reads the list, PUT replaces it)
    pub url: String,

    /// API key sent on writes
    #[serde(default = "empty_secret")]
    pub api_key: Secret<String>,

    /// Query parameter carrying the API key
    #[serde(default = "default_api_key_param")]
    pub api_key_param: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }

    /// Validate store configuration
    ///
    /// A missing API key only blocks startup in production; elsewhere writes
    /// will fail and be logged.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("STORE__URL"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidStoreUrl);
        }
        if self.api_key_param.is_empty() {
            return Err(ValidationError::MissingRequired("STORE__API_KEY_PARAM"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if *environment == Environment::Production {
            if !self.has_api_key() {
                return Err(ValidationError::MissingRequired("STORE__API_KEY"));
            }
            if !self.url.starts_with("https://") {
                return Err(ValidationError::StoreUrlMustBeHttps);
            }
        }
        Ok(())
    }
}

/// Local mirror configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Mirror file path
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
}

impl CacheConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("CACHE__PATH"));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
        }
    }
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

fn default_api_key_param() -> String {
    "apiKey".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("data/buyers.json")
}

//! Buyer verification configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Placeholder used when no secret is configured. Anyone who knows it can
/// mint valid tokens.
pub const INSECURE_DEFAULT_SECRET: &str = "change-me-insecure-default";

/// Verification token configuration
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    /// Shared secret appended to the email before hashing
    #[serde(default = "default_secret")]
    pub secret: Secret<String>,
}

impl VerificationConfig {
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret.expose_secret() == INSECURE_DEFAULT_SECRET
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("VERIFICATION__SECRET"));
        }
        if *environment == Environment::Production && self.uses_default_secret() {
            return Err(ValidationError::InsecureVerificationSecret);
        }
        Ok(())
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
        }
    }
}

fn default_secret() -> Secret<String> {
    Secret::new(INSECURE_DEFAULT_SECRET.to_string())
}

//! Authentication configuration

use super::*;
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT secret
    #[serde(default = "generate_secure_jwt_secret")]
    pub jwt_secret: String,
    /// JWT expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// Header carrying the bearer credential
    #[serde(default = "default_token_header")]
    pub token_header: String,
    /// Scheme prefix of the credential (`Bearer <token>`)
    #[serde(default = "default_token_scheme")]
    pub token_scheme: String,
    /// Upper bound on one token validation, in milliseconds
    #[serde(default = "default_validation_timeout_ms")]
    pub validation_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_jwt_secret(),
            jwt_expiration: default_jwt_expiration(),
            token_header: default_token_header(),
            token_scheme: default_token_scheme(),
            validation_timeout_ms: default_validation_timeout_ms(),
        }
    }
}

impl AuthConfig {
    /// Merge auth configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.jwt_secret.is_empty() {
            self.jwt_secret = other.jwt_secret;
        }
        if other.jwt_expiration != default_jwt_expiration() {
            self.jwt_expiration = other.jwt_expiration;
        }
        if other.token_header != default_token_header() {
            self.token_header = other.token_header;
        }
        if other.token_scheme != default_token_scheme() {
            self.token_scheme = other.token_scheme;
        }
        if other.validation_timeout_ms != default_validation_timeout_ms() {
            self.validation_timeout_ms = other.validation_timeout_ms;
        }
        self
    }

    /// Token validation timeout
    pub fn validation_timeout(&self) -> Duration {
        Duration::from_millis(self.validation_timeout_ms)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long for security".to_string());
        }

        if self.jwt_expiration == 0 {
            return Err("JWT expiration cannot be 0".to_string());
        }

        if self.token_header.trim().is_empty() {
            return Err("Token header name cannot be empty".to_string());
        }

        if self.validation_timeout_ms == 0 {
            return Err("Token validation timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Generate a random JWT secret for configurations that do not set one
fn generate_secure_jwt_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Warn about insecure configuration
pub fn warn_insecure_config(config: &AuthConfig) {
    if config.jwt_expiration > 86400 * 7 {
        warn!("JWT expiration exceeds 7 days; consider shorter-lived tokens");
    }
}

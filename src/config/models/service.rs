//! Top-level service configuration

use super::*;
use crate::utils::error::{HubError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication
    #[serde(default)]
    pub auth: AuthConfig,
    /// Access control
    #[serde(default)]
    pub acl: AclConfig,
    /// Storage
    #[serde(default)]
    pub storage: StorageConfig,
}

impl ServiceConfig {
    /// Build the configuration from defaults overridden by environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = env::var("SCANHUB_HOST") {
            config.server.host = host;
        }
        if let Some(port) = parse_env::<u16>("SCANHUB_PORT")? {
            config.server.port = port;
        }
        if let Ok(url) = env::var("DATABASE_URL") {
            config.storage.database.url = url;
        }
        if let Ok(secret) = env::var("JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Some(expiration) = parse_env::<u64>("JWT_EXPIRATION")? {
            config.auth.jwt_expiration = expiration;
        }
        if let Ok(header) = env::var("SCANHUB_TOKEN_HEADER") {
            config.auth.token_header = header;
        }
        if let Ok(files) = env::var("SCANHUB_GRANTS_FILES") {
            config.acl.grants_files = files
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(PathBuf::from)
                .collect();
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.auth = self.auth.merge(other.auth);
        self.acl = self.acl.merge(other.acl);
        self.storage = self.storage.merge(other.storage);
        self
    }
}

fn parse_env<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| HubError::config(format!("Invalid value for {}: '{}'", name, value))),
        Err(_) => Ok(None),
    }
}

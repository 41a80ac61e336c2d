//! Authentication and authorization types

use crate::utils::error::{HubError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Caller identity established by a validated credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// User ID
    pub id: i64,
    /// Role names carried by the credential
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn new<I, S>(id: i64, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

/// Turns an opaque bearer credential into a caller identity
///
/// Fails with an authentication error when the credential is missing,
/// malformed, expired or otherwise invalid.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser>;
}

/// Run `validator` on `token`, bounded by `timeout`
///
/// Authentication failures pass through unchanged. Any other validator
/// failure, and running out of time, become authentication failures.
pub async fn validate_within(
    validator: &dyn TokenValidator,
    token: &str,
    timeout: Duration,
) -> Result<AuthenticatedUser> {
    match tokio::time::timeout(timeout, validator.validate(token)).await {
        Ok(Ok(user)) => Ok(user),
        Ok(Err(e @ (HubError::Auth(_) | HubError::Jwt(_)))) => Err(e),
        Ok(Err(e)) => {
            warn!("Token validation failed: {}", e);
            Err(HubError::auth("Credential could not be validated"))
        }
        Err(_) => {
            warn!("Token validation timed out after {:?}", timeout);
            Err(HubError::auth("Credential validation timed out"))
        }
    }
}

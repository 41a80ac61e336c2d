//! Authentication and authorization system
//!
//! Token validation, the attribute-level access-control engine, and the
//! request-time guard built on both.

pub mod guard;
pub mod jwt;
pub mod rbac;
pub mod rules;
pub mod types;

pub use guard::{AccessGuard, AuthorizedCall, GuardOutcome};
pub use rules::{OperationRules, RuleTable};
pub use types::{AuthenticatedUser, TokenValidator, validate_within};

use crate::config::AuthConfig;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Main authentication system
#[derive(Debug, Clone)]
pub struct AuthSystem {
    /// JWT handler
    jwt: Arc<jwt::JwtHandler>,
    /// RBAC system
    rbac: rbac::RbacSystem,
    /// Enforcement guard
    guard: AccessGuard,
}

impl AuthSystem {
    /// Create the auth system with the JWT handler as token validator
    pub fn new(config: &AuthConfig, rbac: rbac::RbacSystem, rules: Arc<RuleTable>) -> Result<Self> {
        info!("Initializing authentication system");

        let jwt = Arc::new(jwt::JwtHandler::new(config)?);
        let guard = AccessGuard::new(rbac.clone(), jwt.clone(), rules, config);

        Ok(Self { jwt, rbac, guard })
    }

    pub fn jwt(&self) -> &Arc<jwt::JwtHandler> {
        &self.jwt
    }

    pub fn rbac(&self) -> &rbac::RbacSystem {
        &self.rbac
    }

    pub fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    /// Issue an access token (tooling and tests)
    pub fn issue_token(&self, user_id: i64, roles: Vec<String>) -> Result<String> {
        self.jwt.create_access_token(user_id, roles)
    }
}

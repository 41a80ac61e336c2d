//! Request-time enforcement
//!
//! The guard decides whether a call may proceed: an operation with no rules
//! is open, otherwise the caller must present a valid credential and hold a
//! non-empty grant for at least one of the operation's rules. Authorization
//! stops at the first granting rule; response filtering uses the union of
//! every granting rule.

use crate::config::AuthConfig;
use crate::utils::error::{HubError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::rbac::{Permission, RbacSystem, Rule, union_attrs};
use super::rules::RuleTable;
use super::types::{AuthenticatedUser, TokenValidator, validate_within};

/// Default denial message
pub const MISSING_PRIVILEGES_MESSAGE: &str = "Missing privileges to perform this operation";

/// Result of a successful guard evaluation
#[derive(Debug, Clone)]
pub enum GuardOutcome {
    /// No rules are attached to the operation
    Unrestricted,
    /// The caller satisfied at least one rule
    Authorized(AuthorizedCall),
}

/// An authorised call: who made it and which rules applied
#[derive(Debug, Clone)]
pub struct AuthorizedCall {
    /// Operation id
    pub operation: String,
    /// Authenticated caller
    pub user: AuthenticatedUser,
    /// Rules attached to the operation
    pub rules: Vec<Rule>,
    /// The first rule's permission that granted access
    pub granted: Permission,
    /// Whether the response is projected onto the granted attributes
    pub filter_response: bool,
}

/// Enforcement guard over a rule table
#[derive(Clone)]
pub struct AccessGuard {
    rbac: RbacSystem,
    validator: Arc<dyn TokenValidator>,
    rules: Arc<RuleTable>,
    token_header: String,
    token_scheme: String,
    timeout: Duration,
}

impl std::fmt::Debug for AccessGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGuard")
            .field("operations", &self.rules.len())
            .field("token_header", &self.token_header)
            .field("token_scheme", &self.token_scheme)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AccessGuard {
    pub fn new(
        rbac: RbacSystem,
        validator: Arc<dyn TokenValidator>,
        rules: Arc<RuleTable>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            rbac,
            validator,
            rules,
            token_header: config.token_header.to_ascii_lowercase(),
            token_scheme: config.token_scheme.clone(),
            timeout: config.validation_timeout(),
        }
    }

    /// Name of the header carrying the credential
    pub fn token_header(&self) -> &str {
        &self.token_header
    }

    pub fn rules(&self) -> &Arc<RuleTable> {
        &self.rules
    }

    pub fn rbac(&self) -> &RbacSystem {
        &self.rbac
    }

    /// Strip the configured scheme off a raw header value
    pub fn extract_token<'a>(&self, header_value: Option<&'a str>) -> Result<&'a str> {
        let value = header_value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| HubError::auth("Missing credential"))?;

        if self.token_scheme.is_empty() {
            return Ok(value);
        }

        let (scheme, token) = value
            .split_once(' ')
            .ok_or_else(|| HubError::auth(format!("Expected '{} <token>' credential", self.token_scheme)))?;
        if !scheme.eq_ignore_ascii_case(&self.token_scheme) || token.trim().is_empty() {
            return Err(HubError::auth(format!(
                "Expected '{} <token>' credential",
                self.token_scheme
            )));
        }
        Ok(token.trim())
    }

    /// Validate a bearer token within the configured timeout
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser> {
        validate_within(self.validator.as_ref(), token, self.timeout).await
    }

    /// Authenticate a raw credential header value
    pub async fn authenticate_header(&self, header_value: Option<&str>) -> Result<AuthenticatedUser> {
        let token = self.extract_token(header_value)?;
        self.authenticate(token).await
    }

    /// Decide whether `operation` may run for the presented credential
    pub async fn authorize(&self, operation: &str, header_value: Option<&str>) -> Result<GuardOutcome> {
        let Some(operation_rules) = self.rules.get(operation) else {
            debug!("No rules attached to {}, allowing", operation);
            return Ok(GuardOutcome::Unrestricted);
        };

        let user = match self.authenticate_header(header_value).await {
            Ok(user) => user,
            Err(e) => {
                warn!("Authentication failed for {}: {}", operation, e);
                return Err(e);
            }
        };

        let snapshot = self.rbac.snapshot();
        let granted = operation_rules
            .rules
            .iter()
            .map(|rule| snapshot.can(&user.roles, &rule.resource, rule.action))
            .find(|permission| permission.granted);

        match granted {
            Some(granted) => {
                debug!(
                    "User {} authorized for {} via {} {}",
                    user.id, operation, granted.action, granted.resource
                );
                Ok(GuardOutcome::Authorized(AuthorizedCall {
                    operation: operation.to_string(),
                    user,
                    rules: operation_rules.rules.clone(),
                    granted,
                    filter_response: operation_rules.filter_response,
                }))
            }
            None => {
                warn!(
                    "Denied {} for user {} with roles {:?}: missing privileges",
                    operation, user.id, user.roles
                );
                let message = operation_rules
                    .forbidden_message
                    .clone()
                    .unwrap_or_else(|| MISSING_PRIVILEGES_MESSAGE.to_string());
                Err(HubError::missing_privileges(message))
            }
        }
    }

    /// Attributes a response to `call` may carry: the union over every
    /// rule of the operation, not just the one that authorised it
    pub fn response_attributes(&self, call: &AuthorizedCall) -> Vec<String> {
        let permissions = self.rbac.granted_permissions(&call.user.roles, &call.rules);
        union_attrs(&permissions)
    }
}

//! Custom test assertions
//!
//! Provides domain-specific assertions for permissions and access errors.

use scanhub::auth::rbac::Permission;
use scanhub::utils::error::{DenialCode, HubError};

/// Assertions for Permission
pub trait PermissionAssertions {
    /// Assert the permission is granted with exactly these attributes
    fn assert_grants(&self, attributes: &[&str]);

    /// Assert the permission grants nothing
    fn assert_denied(&self);
}

impl PermissionAssertions for Permission {
    fn assert_grants(&self, attributes: &[&str]) {
        assert!(
            self.granted,
            "Expected {} on {} to be granted for {:?}",
            self.action, self.resource, self.roles
        );
        assert_eq!(self.attributes, attributes, "Unexpected attributes on {}", self.resource);
    }

    fn assert_denied(&self) {
        assert!(
            !self.granted && self.attributes.is_empty(),
            "Expected {} on {} to be denied for {:?}, got {:?}",
            self.action,
            self.resource,
            self.roles,
            self.attributes
        );
    }
}

/// Assert an error is an authorization denial with the given code
pub fn assert_denial(error: &HubError, code: DenialCode) {
    assert_eq!(
        error.denial_code(),
        Some(code),
        "Expected a {} denial, got {:?}",
        code,
        error
    );
}

//! Role and resource queries

use crate::utils::error::Result;

use super::grants::RoleDefinition;
use super::registry::{ExportFormat, ExportView, ResourceGrants};
use super::system::RbacSystem;

impl RbacSystem {
    /// Declared role names, sorted
    pub fn roles(&self) -> Vec<String> {
        self.snapshot().roles()
    }

    /// Granted resource names, sorted
    pub fn resources(&self) -> Vec<String> {
        self.snapshot().resources()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.snapshot().has_role(role)
    }

    /// True iff any of `roles` is declared
    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        self.snapshot().has_any_role(roles)
    }

    pub fn has_resource(&self, resource: &str) -> bool {
        self.snapshot().has_resource(resource)
    }

    /// True iff any of `resources` is granted to some role
    pub fn has_any_resource<S: AsRef<str>>(&self, resources: &[S]) -> bool {
        self.snapshot().has_any_resource(resources)
    }

    /// Grants declared directly on `role`
    pub fn role(&self, role: &str) -> Result<RoleDefinition> {
        self.snapshot().role(role).cloned()
    }

    /// Grants on `resource`, by role
    pub fn resource(&self, resource: &str) -> Result<ResourceGrants> {
        self.snapshot().resource(resource)
    }

    /// `roles` plus every inherited role
    pub fn expand_roles<S: AsRef<str>>(&self, roles: &[S]) -> Vec<String> {
        self.snapshot().expand_roles(roles)
    }

    /// Export the merged grants tree
    pub fn export(&self, view: ExportView, format: ExportFormat) -> Result<String> {
        self.snapshot().export(view, format)
    }
}

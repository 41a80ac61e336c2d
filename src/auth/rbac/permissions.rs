//! Permission resolution

use crate::utils::error::Result;
use std::collections::BTreeMap;

use super::helpers::union_attributes;
use super::system::RbacSystem;
use super::types::{Action, Permission, Rule};

impl RbacSystem {
    /// Evaluate `action` on `resource` for `roles` and their ancestors
    ///
    /// Never fails: unknown roles or resources simply grant nothing.
    pub fn can<S: AsRef<str>>(&self, roles: &[S], resource: &str, action: Action) -> Permission {
        self.snapshot().can(roles, resource, action)
    }

    /// Like [`RbacSystem::can`], rejecting action names outside the four known ones
    pub fn can_str<S: AsRef<str>>(&self, roles: &[S], resource: &str, action: &str) -> Result<Permission> {
        let action = action.parse::<Action>()?;
        Ok(self.can(roles, resource, action))
    }

    /// Evaluate every rule independently against one snapshot
    pub fn granted_permissions<S: AsRef<str>>(&self, roles: &[S], rules: &[Rule]) -> Vec<Permission> {
        let snapshot = self.snapshot();
        rules
            .iter()
            .map(|rule| snapshot.can(roles, &rule.resource, rule.action))
            .collect()
    }
}

/// Union of the attributes of several permissions
pub fn union_attrs(permissions: &[Permission]) -> Vec<String> {
    union_attributes(permissions.iter().map(|p| p.attributes.as_slice()))
}

/// Union of the attributes of the permissions on `resource`
///
/// A resource written as `!name` selects every permission *not* on `name`.
pub fn union_attrs_for(permissions: &[Permission], resource: &str) -> Vec<String> {
    let selected: Box<dyn Fn(&Permission) -> bool> = match resource.strip_prefix('!') {
        Some(excluded) => Box::new(move |p| p.resource != excluded),
        None => Box::new(move |p| p.resource == resource),
    };

    union_attributes(
        permissions
            .iter()
            .filter(|p| selected(p))
            .map(|p| p.attributes.as_slice()),
    )
}

/// Union of attributes, grouped by resource
pub fn union_attrs_by_resources(permissions: &[Permission]) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<&str, Vec<&[String]>> = BTreeMap::new();
    for permission in permissions {
        grouped
            .entry(permission.resource.as_str())
            .or_default()
            .push(permission.attributes.as_slice());
    }

    grouped
        .into_iter()
        .map(|(resource, lists)| (resource.to_string(), union_attributes(lists)))
        .collect()
}

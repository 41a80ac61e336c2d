//! Grants registry
//!
//! Modules contribute grant tables under their own name. Every merge rebuilds
//! the complete table from all contributions in module-name order, checks it
//! for inheritance cycles, indexes it and publishes it as a new immutable
//! snapshot. Readers load the current snapshot without locking.

use crate::utils::error::{HubError, Result};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

use super::grants::{GrantsDefinition, RoleDefinition};
use super::helpers::union_attributes;
use super::types::{Action, ActionKey, Permission};

/// Grants on one resource, keyed by role
pub type ResourceGrants = BTreeMap<String, BTreeMap<ActionKey, Vec<String>>>;

/// How an exported grants tree is keyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportView {
    #[default]
    Role,
    Resource,
}

/// Serialization format of an exported grants tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

type RoleIndex = HashMap<String, HashMap<Action, Vec<String>>>;

/// Immutable, indexed view of the merged grants database
#[derive(Debug, Default)]
pub struct GrantsSnapshot {
    version: u64,
    modules: Vec<String>,
    grants: GrantsDefinition,
    /// role -> resource -> action -> attributes, scopes folded together
    index: HashMap<String, RoleIndex>,
    resources: BTreeSet<String>,
}

impl GrantsSnapshot {
    fn build(version: u64, modules: Vec<String>, grants: GrantsDefinition) -> Result<Self> {
        grants.validate()?;
        check_acyclic(&grants)?;

        let mut index: HashMap<String, RoleIndex> = HashMap::new();
        let mut resources = BTreeSet::new();
        for (role, definition) in grants.roles() {
            let role_index = index.entry(role.clone()).or_default();
            for (resource, actions) in &definition.resources {
                resources.insert(resource.clone());
                // Each scope contributes like a separate role would
                let mut scopes: HashMap<Action, Vec<&[String]>> = HashMap::new();
                for (key, attributes) in actions {
                    scopes.entry(key.action).or_default().push(attributes.as_slice());
                }
                let resource_index = role_index.entry(resource.clone()).or_default();
                for (action, lists) in scopes {
                    resource_index.insert(action, union_attributes(lists));
                }
            }
        }

        Ok(Self {
            version,
            modules,
            grants,
            index,
            resources,
        })
    }

    /// Number of merges published so far
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Names of the modules that contributed, in merge order
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    pub fn grants(&self) -> &GrantsDefinition {
        &self.grants
    }

    /// Declared role names, sorted
    pub fn roles(&self) -> Vec<String> {
        self.grants.roles().keys().cloned().collect()
    }

    /// Granted resource names, sorted
    pub fn resources(&self) -> Vec<String> {
        self.resources.iter().cloned().collect()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.grants.role(role).is_some()
    }

    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        roles.iter().any(|r| self.has_role(r.as_ref()))
    }

    pub fn has_resource(&self, resource: &str) -> bool {
        self.resources.contains(resource)
    }

    pub fn has_any_resource<S: AsRef<str>>(&self, resources: &[S]) -> bool {
        resources.iter().any(|r| self.has_resource(r.as_ref()))
    }

    /// Grants declared directly on `role`
    pub fn role(&self, role: &str) -> Result<&RoleDefinition> {
        self.grants
            .role(role)
            .ok_or_else(|| HubError::not_found(format!("Role '{}' is not registered", role)))
    }

    /// Grants on `resource`, by role
    pub fn resource(&self, resource: &str) -> Result<ResourceGrants> {
        if !self.has_resource(resource) {
            return Err(HubError::not_found(format!("Resource '{}' is not registered", resource)));
        }

        Ok(self
            .grants
            .roles()
            .iter()
            .filter_map(|(role, definition)| {
                definition
                    .resources
                    .get(resource)
                    .map(|actions| (role.clone(), actions.clone()))
            })
            .collect())
    }

    /// Roles plus all their ancestors, de-duplicated, each role before its parents
    pub fn expand_roles<S: AsRef<str>>(&self, roles: &[S]) -> Vec<String> {
        let mut expanded: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut pending: Vec<String> = roles.iter().rev().map(|r| r.as_ref().to_string()).collect();

        while let Some(role) = pending.pop() {
            if !seen.insert(role.clone()) {
                continue;
            }
            if let Some(definition) = self.grants.role(&role) {
                pending.extend(definition.extends.iter().rev().cloned());
            }
            expanded.push(role);
        }

        expanded
    }

    /// Evaluate one (roles, resource, action) query
    pub fn can<S: AsRef<str>>(&self, roles: &[S], resource: &str, action: Action) -> Permission {
        let expanded = self.expand_roles(roles);
        let attributes = union_attributes(expanded.iter().filter_map(|role| {
            self.index
                .get(role)
                .and_then(|resources| resources.get(resource))
                .and_then(|actions| actions.get(&action))
                .map(Vec::as_slice)
        }));

        debug!(
            "can({:?}, {}, {}) -> {:?}",
            roles.iter().map(AsRef::as_ref).collect::<Vec<&str>>(),
            resource,
            action,
            attributes
        );

        Permission::from_attributes(roles, resource, action, attributes)
    }

    /// The grants tree as a JSON value, keyed by role or by resource
    pub fn to_value(&self, view: ExportView) -> Result<serde_json::Value> {
        let value = match view {
            ExportView::Role => serde_json::to_value(&self.grants)?,
            ExportView::Resource => {
                let by_resource: BTreeMap<&String, ResourceGrants> = self
                    .resources
                    .iter()
                    .map(|resource| Ok((resource, self.resource(resource)?)))
                    .collect::<Result<_>>()?;
                serde_json::to_value(by_resource)?
            }
        };
        Ok(value)
    }

    pub fn to_json(&self, view: ExportView) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_value(view)?)?)
    }

    pub fn to_yaml(&self, view: ExportView) -> Result<String> {
        Ok(serde_yaml::to_string(&self.to_value(view)?)?)
    }

    pub fn export(&self, view: ExportView, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => self.to_json(view),
            ExportFormat::Yaml => self.to_yaml(view),
        }
    }
}

/// Reject inheritance cycles; parents that are not declared are leaves
fn check_acyclic(grants: &GrantsDefinition) -> Result<()> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Visiting,
        Done,
    }

    fn visit<'a>(
        role: &'a str,
        grants: &'a GrantsDefinition,
        marks: &mut HashMap<&'a str, Mark>,
        path: &mut Vec<&'a str>,
    ) -> Result<()> {
        match marks.get(role) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|r| *r == role).unwrap_or(0);
                let mut cycle: Vec<&str> = path[start..].to_vec();
                cycle.push(role);
                return Err(HubError::config(format!(
                    "Role inheritance cycle detected: {}",
                    cycle.join(" -> ")
                )));
            }
            None => {}
        }

        marks.insert(role, Mark::Visiting);
        path.push(role);
        if let Some(definition) = grants.role(role) {
            for parent in &definition.extends {
                visit(parent, grants, marks, path)?;
            }
        }
        path.pop();
        marks.insert(role, Mark::Done);
        Ok(())
    }

    let mut marks = HashMap::new();
    let mut path = Vec::new();
    for role in grants.roles().keys() {
        visit(role, grants, &mut marks, &mut path)?;
    }
    Ok(())
}

/// Single-writer, lock-free-reader store of the merged grants database
pub struct GrantsRegistry {
    current: ArcSwap<GrantsSnapshot>,
    contributions: Mutex<BTreeMap<String, GrantsDefinition>>,
}

impl GrantsRegistry {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(GrantsSnapshot::default()),
            contributions: Mutex::new(BTreeMap::new()),
        }
    }

    /// The currently published snapshot
    pub fn snapshot(&self) -> Arc<GrantsSnapshot> {
        self.current.load_full()
    }

    /// Record `module`'s grant table and publish the rebuilt database
    ///
    /// Returns `false` when the module already contributed an identical
    /// table, in which case nothing is republished. A table that fails
    /// validation leaves the published snapshot untouched.
    pub fn merge(&self, module: &str, definition: GrantsDefinition) -> Result<bool> {
        if module.trim().is_empty() {
            return Err(HubError::config("Grant tables must be contributed under a module name"));
        }

        let mut contributions = self.contributions.lock();
        if contributions.get(module) == Some(&definition) {
            debug!("Grants of module '{}' unchanged, skipping merge", module);
            return Ok(false);
        }

        let mut next = contributions.clone();
        next.insert(module.to_string(), definition);

        let mut merged = GrantsDefinition::new();
        for table in next.values() {
            merged.merge_from(table);
        }

        let version = self.current.load().version + 1;
        let snapshot = GrantsSnapshot::build(version, next.keys().cloned().collect(), merged)?;
        info!(
            "Merged grants of module '{}' (version {}, {} roles, {} resources)",
            module,
            version,
            snapshot.grants.roles().len(),
            snapshot.resources.len()
        );

        *contributions = next;
        self.current.store(Arc::new(snapshot));
        Ok(true)
    }
}

impl Default for GrantsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GrantsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.current.load();
        f.debug_struct("GrantsRegistry")
            .field("version", &snapshot.version)
            .field("modules", &snapshot.modules)
            .finish()
    }
}

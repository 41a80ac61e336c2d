//! Declarative grant tables
//!
//! A grant table maps `role -> resource -> "<action>:<scope>" -> attributes`,
//! with an optional `$extend` entry per role naming its parent roles:
//!
//! ```yaml
//! BasicUser:
//!   $extend: [Guest]
//!   ownUser:
//!     read:own: [id, name]
//!     update:own: ["*", "!roles"]
//! ```

use crate::utils::error::{HubError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;

use super::helpers::extend_unique;
use super::types::ActionKey;

/// Key under a role naming the roles it inherits from
pub const EXTEND_KEY: &str = "$extend";

static ROLE_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("Invalid role name regex"));

/// Attribute lists of one resource, per declared action key
pub type ActionGrants = BTreeMap<ActionKey, Vec<String>>;

/// Grants of one role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleDefinition {
    /// Parent roles
    #[serde(rename = "$extend", skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    /// Resource grants
    #[serde(flatten)]
    pub resources: BTreeMap<String, ActionGrants>,
}

impl RoleDefinition {
    /// Fold another definition of the same role into this one
    pub fn merge_from(&mut self, other: &RoleDefinition) {
        extend_unique(&mut self.extends, &other.extends);
        for (resource, actions) in &other.resources {
            let target = self.resources.entry(resource.clone()).or_default();
            for (key, attributes) in actions {
                extend_unique(target.entry(*key).or_default(), attributes);
            }
        }
    }
}

/// A full or partial grants database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GrantsDefinition {
    roles: BTreeMap<String, RoleDefinition>,
}

impl GrantsDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML (or JSON) grant table
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(source)
            .map_err(|e| HubError::config(format!("Malformed grants document: {}", e)))?;
        Self::from_yaml_value(&document)
    }

    /// Load a grant table from disk
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            HubError::config(format!("Failed to read grants file {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
            .map_err(|e| HubError::config(format!("{} ({})", e, path.display())))
    }

    /// Build a grant table from an already parsed document
    pub fn from_yaml_value(document: &Value) -> Result<Self> {
        let mapping = match document {
            Value::Null => return Ok(Self::new()),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(HubError::config(format!(
                    "Grants document must be a mapping of roles, found {}",
                    describe(other)
                )));
            }
        };

        let mut definition = Self::new();
        for (key, body) in mapping {
            let role = key.as_str().ok_or_else(|| {
                HubError::config(format!("Role names must be strings, found {}", describe(key)))
            })?;
            validate_role_name(role)?;
            let parsed = parse_role(role, body)?;
            definition
                .roles
                .entry(role.to_string())
                .or_default()
                .merge_from(&parsed);
        }

        Ok(definition)
    }

    /// Declare parent roles for `role`
    pub fn extend<I, S>(mut self, role: &str, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parents: Vec<String> = parents.into_iter().map(Into::into).collect();
        extend_unique(&mut self.roles.entry(role.to_string()).or_default().extends, &parents);
        self
    }

    /// Declare one grant
    pub fn grant<I, S>(mut self, role: &str, resource: &str, key: ActionKey, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes: Vec<String> = attributes.into_iter().map(Into::into).collect();
        let actions = self
            .roles
            .entry(role.to_string())
            .or_default()
            .resources
            .entry(resource.to_string())
            .or_default();
        extend_unique(actions.entry(key).or_default(), &attributes);
        self
    }

    /// Deep union with another table: parents and attributes are
    /// de-duplicated, existing entries keep their position
    pub fn merge_from(&mut self, other: &GrantsDefinition) {
        for (role, definition) in &other.roles {
            self.roles.entry(role.clone()).or_default().merge_from(definition);
        }
    }

    pub fn roles(&self) -> &BTreeMap<String, RoleDefinition> {
        &self.roles
    }

    pub fn role(&self, name: &str) -> Option<&RoleDefinition> {
        self.roles.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        for (role, definition) in &self.roles {
            validate_role_name(role)?;
            for parent in &definition.extends {
                validate_role_name(parent)?;
            }
            if definition.resources.keys().any(|r| r.is_empty()) {
                return Err(HubError::config(format!("Role '{}' grants an empty resource name", role)));
            }
        }
        Ok(())
    }
}

fn validate_role_name(name: &str) -> Result<()> {
    if ROLE_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(HubError::config(format!(
            "Invalid role name '{}': must start with a letter and contain only letters, digits, '_' or '-'",
            name
        )))
    }
}

fn parse_role(role: &str, body: &Value) -> Result<RoleDefinition> {
    let mapping = match body {
        Value::Null => return Ok(RoleDefinition::default()),
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(HubError::config(format!(
                "Role '{}' must map resources to actions, found {}",
                role,
                describe(other)
            )));
        }
    };

    let mut definition = RoleDefinition::default();
    for (key, value) in mapping {
        let key = key.as_str().ok_or_else(|| {
            HubError::config(format!(
                "Resource names of role '{}' must be strings, found {}",
                role,
                describe(key)
            ))
        })?;

        if key == EXTEND_KEY {
            let parents = parse_parents(role, value)?;
            extend_unique(&mut definition.extends, &parents);
            continue;
        }

        if key.is_empty() {
            return Err(HubError::config(format!("Role '{}' grants an empty resource name", role)));
        }

        let actions = parse_actions(role, key, value)?;
        let target = definition.resources.entry(key.to_string()).or_default();
        for (action, attributes) in actions {
            extend_unique(target.entry(action).or_default(), &attributes);
        }
    }

    Ok(definition)
}

fn parse_parents(role: &str, value: &Value) -> Result<Vec<String>> {
    let parents = match value {
        Value::String(parent) => vec![parent.clone()],
        Value::Sequence(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    HubError::config(format!(
                        "Parents of role '{}' must be strings, found {}",
                        role,
                        describe(item)
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?,
        other => {
            return Err(HubError::config(format!(
                "'{}' of role '{}' must be a role name or a list of role names, found {}",
                EXTEND_KEY,
                role,
                describe(other)
            )));
        }
    };

    for parent in &parents {
        validate_role_name(parent)?;
    }
    Ok(parents)
}

fn parse_actions(role: &str, resource: &str, value: &Value) -> Result<Vec<(ActionKey, Vec<String>)>> {
    let mapping = value.as_mapping().ok_or_else(|| {
        HubError::config(format!(
            "Grants of role '{}' on '{}' must map actions to attribute lists, found {}",
            role,
            resource,
            describe(value)
        ))
    })?;

    mapping
        .iter()
        .map(|(key, attributes)| {
            let key = key.as_str().ok_or_else(|| {
                HubError::config(format!(
                    "Action keys of role '{}' on '{}' must be strings, found {}",
                    role,
                    resource,
                    describe(key)
                ))
            })?;
            let action = key.parse::<ActionKey>().map_err(|e| {
                HubError::config(format!("Role '{}' on '{}': {}", role, resource, e))
            })?;
            Ok((action, parse_attributes(role, resource, key, attributes)?))
        })
        .collect()
}

fn parse_attributes(role: &str, resource: &str, action: &str, value: &Value) -> Result<Vec<String>> {
    let invalid = |found: &Value| {
        HubError::config(format!(
            "Attributes of role '{}' on '{}' for '{}' must be a list of strings, found {}",
            role,
            resource,
            action,
            describe(found)
        ))
    };

    let items = value.as_sequence().ok_or_else(|| invalid(value))?;
    let mut attributes = Vec::with_capacity(items.len());
    for item in items {
        let attribute = item.as_str().ok_or_else(|| invalid(item))?;
        if attribute.is_empty() || attribute == "!" {
            return Err(invalid(item));
        }
        if !attributes.iter().any(|a: &String| a == attribute) {
            attributes.push(attribute.to_string());
        }
    }
    Ok(attributes)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

//! RBAC type definitions

use crate::utils::error::{HubError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::filter;

/// Attribute that stands for "every attribute"
pub const WILDCARD: &str = "*";

/// Prefix marking a negated attribute (`"!field"`)
pub const NEGATION_PREFIX: char = '!';

/// One of the four meaningful actions on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Create a new record
    Create,
    /// Read a record
    Read,
    /// Update a record
    Update,
    /// Delete a record
    Delete,
}

impl Action {
    /// All actions, in declaration order
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    /// Lowercase action name
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(Action::Create),
            "read" => Ok(Action::Read),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            other => Err(HubError::validation(format!(
                "Unknown action '{}': expected create, read, update or delete",
                other
            ))),
        }
    }
}

/// Possession qualifier of a declared grant (`read:any` vs `read:own`)
///
/// Both scopes resolve identically; the scope is kept so exported grant
/// tables round-trip the way they were declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Scope {
    #[default]
    Any,
    Own,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Any => "any",
            Scope::Own => "own",
        }
    }
}

/// Key of a declared grant: `<action>` or `<action>:<scope>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionKey {
    pub action: Action,
    pub scope: Scope,
}

impl ActionKey {
    pub fn new(action: Action, scope: Scope) -> Self {
        Self { action, scope }
    }

    pub fn any(action: Action) -> Self {
        Self::new(action, Scope::Any)
    }

    pub fn own(action: Action) -> Self {
        Self::new(action, Scope::Own)
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.action, self.scope.as_str())
    }
}

impl FromStr for ActionKey {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self> {
        let (action, scope) = match s.split_once(':') {
            Some((action, scope)) => (action, Some(scope)),
            None => (s, None),
        };

        let action = action.parse::<Action>()?;
        let scope = match scope {
            None | Some("any") => Scope::Any,
            Some("own") => Scope::Own,
            Some(other) => {
                return Err(HubError::validation(format!(
                    "Unknown scope '{}' in '{}': expected any or own",
                    other, s
                )));
            }
        };

        Ok(Self { action, scope })
    }
}

impl Serialize for ActionKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of evaluating one (roles, resource, action) query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Roles the query was evaluated for, before inheritance expansion
    pub roles: Vec<String>,
    /// Resource name
    pub resource: String,
    /// Action evaluated
    pub action: Action,
    /// Whether at least one attribute is granted
    pub granted: bool,
    /// Normalised allow-list: `["*", "!neg", ...]` or named attributes
    pub attributes: Vec<String>,
}

impl Permission {
    /// A permission that grants nothing
    pub fn denied<S: AsRef<str>>(roles: &[S], resource: &str, action: Action) -> Self {
        Self::from_attributes(roles, resource, action, Vec::new())
    }

    pub(crate) fn from_attributes<S: AsRef<str>>(
        roles: &[S],
        resource: &str,
        action: Action,
        attributes: Vec<String>,
    ) -> Self {
        Self {
            roles: roles.iter().map(|r| r.as_ref().to_string()).collect(),
            resource: resource.to_string(),
            action,
            granted: !attributes.is_empty(),
            attributes,
        }
    }

    /// Whether a single top-level attribute is visible under this permission
    pub fn allows(&self, attribute: &str) -> bool {
        if self.attributes.iter().any(|a| a == WILDCARD) {
            !self
                .attributes
                .iter()
                .filter_map(|a| a.strip_prefix(NEGATION_PREFIX))
                .any(|negated| negated == attribute)
        } else {
            self.attributes.iter().any(|a| a == attribute)
        }
    }

    /// Project a value onto this permission's attributes
    pub fn filter(&self, value: &serde_json::Value) -> serde_json::Value {
        filter::filter(value, &self.attributes)
    }
}

/// One `{ action, resource }` entry of an operation's rule list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub action: Action,
    pub resource: String,
}

impl Rule {
    pub fn new(action: Action, resource: impl Into<String>) -> Self {
        Self {
            action,
            resource: resource.into(),
        }
    }
}

/// The global/owned/shared resources that together guard one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceTriplet {
    /// Resource granted to privileged roles regardless of the record
    pub global: &'static str,
    /// Resource applying when the caller created the record
    pub owned: &'static str,
    /// Resource applying when the caller participates in the record
    pub shared: Option<&'static str>,
}

impl ResourceTriplet {
    pub const fn new(global: &'static str, owned: &'static str) -> Self {
        Self {
            global,
            owned,
            shared: None,
        }
    }

    pub const fn with_shared(mut self, shared: &'static str) -> Self {
        self.shared = Some(shared);
        self
    }

    /// All resource names of the triplet, global first
    pub fn resources(&self) -> Vec<&'static str> {
        let mut resources = vec![self.global, self.owned];
        resources.extend(self.shared);
        resources
    }

    /// Rule list authorising `action` on any member of the triplet
    pub fn rules(&self, action: Action) -> Vec<Rule> {
        self.resources()
            .into_iter()
            .map(|resource| Rule::new(action, resource))
            .collect()
    }
}

//! Per-operation access rules
//!
//! Operations are identified as `"<METHOD> <route pattern>"`, for example
//! `"GET /projects/{id}"`. An operation without an entry is open.

use serde::Serialize;
use std::collections::HashMap;

use super::rbac::{Action, ResourceTriplet, Rule};

/// Rules guarding one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationRules {
    /// Any one of these, granted with a non-empty attribute list, authorises the call
    pub rules: Vec<Rule>,
    /// Message replacing the default denial message
    pub forbidden_message: Option<String>,
    /// Whether successful responses are projected onto the granted attributes
    pub filter_response: bool,
}

impl OperationRules {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            forbidden_message: None,
            filter_response: true,
        }
    }

    /// Rules for `action` on every member of a triplet
    pub fn for_triplet(triplet: &ResourceTriplet, action: Action) -> Self {
        Self::new(triplet.rules(action))
    }

    pub fn with_forbidden_message(mut self, message: impl Into<String>) -> Self {
        self.forbidden_message = Some(message.into());
        self
    }

    /// Leave responses untouched, for handlers that project their own output
    pub fn without_response_filter(mut self) -> Self {
        self.filter_response = false;
        self
    }
}

/// Registration table from operation id to its rules
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    operations: HashMap<String, OperationRules>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical id of an operation
    pub fn operation_id(method: &str, pattern: &str) -> String {
        format!("{} {}", method.to_ascii_uppercase(), pattern)
    }

    /// Register (or replace) the rules of an operation
    pub fn register(&mut self, method: &str, pattern: &str, rules: OperationRules) -> &mut Self {
        self.operations.insert(Self::operation_id(method, pattern), rules);
        self
    }

    pub fn get(&self, operation: &str) -> Option<&OperationRules> {
        self.operations.get(operation)
    }

    pub fn lookup(&self, method: &str, pattern: &str) -> Option<&OperationRules> {
        self.get(&Self::operation_id(method, pattern))
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Registered operation ids, sorted
    pub fn operations(&self) -> Vec<&str> {
        let mut operations: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        operations.sort_unstable();
        operations
    }
}

//! Attribute allow-list projection over JSON values
//!
//! An allow-list is either a set of named (possibly dotted) paths, or the
//! wildcard `"*"` followed by negated paths (`"!secret"`, `"!file.path"`).
//! Arrays are projected element by element, at the top level and anywhere
//! along a dotted path. Scalars pass through unchanged.

use serde_json::{Map, Value};

use super::types::{NEGATION_PREFIX, WILDCARD};

/// Project `value` onto the attributes of an allow-list
pub fn filter<S: AsRef<str>>(value: &Value, attributes: &[S]) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|item| filter(item, attributes)).collect()),
        Value::Object(_) => {
            if attributes.iter().any(|a| a.as_ref() == WILDCARD) {
                let mut projected = value.clone();
                for negated in attributes
                    .iter()
                    .filter_map(|a| a.as_ref().strip_prefix(NEGATION_PREFIX))
                {
                    remove_path(&mut projected, &split_path(negated));
                }
                projected
            } else {
                let mut projected = Value::Object(Map::new());
                for attribute in attributes.iter().map(|a| a.as_ref()) {
                    if attribute.starts_with(NEGATION_PREFIX) {
                        continue;
                    }
                    if let Some(picked) = pick(value, &split_path(attribute)) {
                        merge(&mut projected, picked);
                    }
                }
                projected
            }
        }
        other => other.clone(),
    }
}

/// Whether the projection of `value` keeps nothing at all
pub fn is_empty_projection(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('.').filter(|segment| !segment.is_empty()).collect()
}

/// Copy the sub-tree at `path`, wrapped in the objects leading to it
fn pick(source: &Value, path: &[&str]) -> Option<Value> {
    let (head, rest) = path.split_first()?;
    match source {
        Value::Object(map) => {
            let child = map.get(*head)?;
            let picked = if rest.is_empty() {
                child.clone()
            } else {
                pick(child, rest)?
            };
            let mut wrapper = Map::new();
            wrapper.insert((*head).to_string(), picked);
            Some(Value::Object(wrapper))
        }
        // Elements keep their index; scalars pass through like at the top level
        Value::Array(items) => Some(Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(_) | Value::Array(_) => {
                        pick(item, path).unwrap_or_else(|| Value::Object(Map::new()))
                    }
                    scalar => scalar.clone(),
                })
                .collect(),
        )),
        _ => None,
    }
}

/// Deep-merge `addition` into `target`; arrays of equal length merge element-wise
fn merge(target: &mut Value, addition: Value) {
    match (target, addition) {
        (Value::Object(target), Value::Object(addition)) => {
            for (key, value) in addition {
                match target.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(addition)) if target.len() == addition.len() => {
            for (existing, value) in target.iter_mut().zip(addition) {
                merge(existing, value);
            }
        }
        (target, addition) => *target = addition,
    }
}

fn remove_path(value: &mut Value, path: &[&str]) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    match value {
        Value::Object(map) => {
            if rest.is_empty() {
                map.remove(*head);
            } else if let Some(child) = map.get_mut(*head) {
                remove_path(child, rest);
            }
        }
        Value::Array(items) => {
            for item in items {
                remove_path(item, path);
            }
        }
        _ => {}
    }
}

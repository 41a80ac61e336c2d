//! RBAC helper functions

use std::collections::HashSet;

use super::types::{NEGATION_PREFIX, WILDCARD};

/// Union several attribute lists into one normalised allow-list
///
/// Empty lists do not take part. When any list carries the wildcard the
/// result is `["*", "!neg", ...]`, keeping only the negations asserted by
/// every contributing list. Otherwise the result is the de-duplicated union
/// of named attributes in first-seen order, and negations are dropped.
pub(crate) fn union_attributes<'a, I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let lists: Vec<&[String]> = lists.into_iter().filter(|list| !list.is_empty()).collect();

    if lists.iter().any(|list| list.iter().any(|a| a == WILDCARD)) {
        let mut negations: Vec<(&str, usize)> = Vec::new();
        for list in &lists {
            let mut seen = HashSet::new();
            for negation in list.iter().filter(|a| a.starts_with(NEGATION_PREFIX)) {
                if !seen.insert(negation.as_str()) {
                    continue;
                }
                match negations.iter_mut().find(|(n, _)| *n == negation.as_str()) {
                    Some((_, count)) => *count += 1,
                    None => negations.push((negation.as_str(), 1)),
                }
            }
        }

        std::iter::once(WILDCARD.to_string())
            .chain(
                negations
                    .into_iter()
                    .filter(|(_, count)| *count == lists.len())
                    .map(|(negation, _)| negation.to_string()),
            )
            .collect()
    } else {
        let mut seen = HashSet::new();
        lists
            .iter()
            .flat_map(|list| list.iter())
            .filter(|a| !a.starts_with(NEGATION_PREFIX))
            .filter(|a| seen.insert(a.as_str()))
            .cloned()
            .collect()
    }
}

/// Append `additions` to `target`, skipping entries already present
pub(crate) fn extend_unique(target: &mut Vec<String>, additions: &[String]) {
    for addition in additions {
        if !target.contains(addition) {
            target.push(addition.clone());
        }
    }
}

//! Merging and diffing map trees.

use indexmap::IndexMap;
use serde::Serialize;

use crate::node::{Node, NodeMap};

/// Recursively merge `b` into a copy of `a`.
///
/// Where both sides hold a map under the same key the maps are merged;
/// otherwise the value from `b` replaces the one in `a`. `a` is not modified.
///
/// # Example
///
/// ```
/// use dict_utils::{merge, Node};
/// use serde_json::json;
///
/// let a = Node::from(json!({"a": {"b": 1}}));
/// let b = Node::from(json!({"a": {"c": 2}}));
/// let merged = merge(a.as_map().unwrap(), b.as_map().unwrap());
/// assert_eq!(Node::from(merged), Node::from(json!({"a": {"b": 1, "c": 2}})));
/// ```
pub fn merge(a: &NodeMap, b: &NodeMap) -> NodeMap {
    let mut result = a.clone();
    deep_update(&mut result, b);
    result
}

/// Recursively merge `b` into `a` in place and return `a`.
///
/// Same rule as [`merge`].
pub fn deep_update<'a>(a: &'a mut NodeMap, b: &NodeMap) -> &'a mut NodeMap {
    for (key, incoming) in b {
        if let (Some(Node::Map(existing)), Node::Map(incoming)) = (a.get_mut(key), incoming) {
            deep_update(existing, incoming);
            continue;
        }
        a.insert(key.clone(), incoming.clone());
    }
    a
}

/// Top-level difference between two maps.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Diff {
    /// Entries only in the new map.
    pub added: NodeMap,
    /// Entries only in the old map.
    pub removed: NodeMap,
    /// Keys in both maps with unequal values, as `(old, new)`.
    pub changed: IndexMap<String, (Node, Node)>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Compare the top-level entries of `old` and `new`.
///
/// Values are compared by value equality, nested maps included, but a change
/// deep inside a nested map is reported as a change of its top-level key.
///
/// # Example
///
/// ```
/// use dict_utils::{diff, Node};
/// use serde_json::json;
///
/// let old = Node::from(json!({"a": 1}));
/// let new = Node::from(json!({"a": 2, "b": 3}));
/// let d = diff(old.as_map().unwrap(), new.as_map().unwrap());
/// assert_eq!(Node::from(d.added), Node::from(json!({"b": 3})));
/// assert!(d.removed.is_empty());
/// assert_eq!(d.changed["a"], (Node::from(1), Node::from(2)));
/// ```
pub fn diff(old: &NodeMap, new: &NodeMap) -> Diff {
    let added = new
        .iter()
        .filter(|(key, _)| !old.contains_key(*key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let removed = old
        .iter()
        .filter(|(key, _)| !new.contains_key(*key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let changed = old
        .iter()
        .filter_map(|(key, before)| {
            let after = new.get(key)?;
            (before != after).then(|| (key.clone(), (before.clone(), after.clone())))
        })
        .collect();
    Diff {
        added,
        removed,
        changed,
    }
}

//! Read access by dot path.

use crate::node::Node;
use crate::path::{split_path, Segment};

/// Get a value from a tree by dot path.
///
/// Returns `None` as soon as a step fails: a missing map key, a non-digit or
/// out-of-range segment on a sequence, or a scalar with no field access.
///
/// # Example
///
/// ```
/// use dict_utils::{get, Node};
/// use serde_json::json;
///
/// let doc = Node::from(json!({"a": [{"b": 5}]}));
/// assert_eq!(get(&doc, "a.0.b"), Some(&Node::from(5)));
/// assert_eq!(get(&doc, "a.1.b"), None);
/// ```
pub fn get<'a>(root: &'a Node, path: &str) -> Option<&'a Node> {
    let mut current = root;
    for segment in split_path(path) {
        current = step(current, segment)?;
    }
    Some(current)
}

/// Get a value by dot path, falling back to `default`.
///
/// A missing map key substitutes `default` and the walk continues from it, so
/// a map default can satisfy the rest of the path. Any other failed step
/// returns `default` immediately.
///
/// # Example
///
/// ```
/// use dict_utils::{get_or, Node};
/// use serde_json::json;
///
/// let doc = Node::from(json!({"a": {"b": 1}}));
/// let fallback = Node::from("none");
/// assert_eq!(get_or(&doc, "a.b", &fallback), &Node::from(1));
/// assert_eq!(get_or(&doc, "a.x.y", &fallback), &fallback);
/// ```
pub fn get_or<'a>(root: &'a Node, path: &str, default: &'a Node) -> &'a Node {
    let mut current = root;
    for segment in split_path(path) {
        current = match current {
            Node::Map(map) => map.get(segment.as_str()).unwrap_or(default),
            _ => match step(current, segment) {
                Some(next) => next,
                None => return default,
            },
        };
    }
    current
}

/// Check whether a path resolves to a stored value.
///
/// A stored `null` counts as present.
pub fn has(root: &Node, path: &str) -> bool {
    get(root, path).is_some()
}

/// Collect every value stored under `key` anywhere in the tree.
///
/// The walk is depth-first and pre-order through maps and sequences. A match
/// is recorded before its value is searched, so nested matches follow their
/// ancestors.
///
/// # Example
///
/// ```
/// use dict_utils::{collect_by_key, Node};
/// use serde_json::json;
///
/// let doc = Node::from(json!({"a": 1, "b": {"a": 2}, "c": [{"a": 3}, {"a": 4}]}));
/// let found: Vec<i64> = collect_by_key(&doc, "a")
///     .into_iter()
///     .filter_map(Node::as_i64)
///     .collect();
/// assert_eq!(found, vec![1, 2, 3, 4]);
/// ```
pub fn collect_by_key<'a>(root: &'a Node, key: &str) -> Vec<&'a Node> {
    let mut found = Vec::new();
    collect_into(root, key, &mut found);
    found
}

fn collect_into<'a>(node: &'a Node, key: &str, found: &mut Vec<&'a Node>) {
    match node {
        Node::Map(map) => {
            for (k, value) in map {
                if k == key {
                    found.push(value);
                }
                collect_into(value, key, found);
            }
        }
        Node::Seq(items) => {
            for item in items {
                collect_into(item, key, found);
            }
        }
        _ => {}
    }
}

/// One lookup step.
fn step<'a>(node: &'a Node, segment: Segment<'_>) -> Option<&'a Node> {
    match node {
        Node::Map(map) => map.get(segment.as_str()),
        Node::Seq(items) => items.get(segment.index()?),
        other => other.as_field_access()?.field(segment.as_str()),
    }
}

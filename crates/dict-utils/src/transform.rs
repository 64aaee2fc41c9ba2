//! Structural transforms over map trees.
//!
//! Every function here builds a new structure and leaves its input alone.
//! Recursion goes through `Map` values only; sequences, records and scalars
//! are leaves.

use std::collections::HashSet;

use crate::node::{Node, NodeMap};
use crate::options::FlattenOptions;

/// Flatten nested maps into one level with `.`-joined keys.
///
/// # Example
///
/// ```
/// use dict_utils::{flatten, Node};
/// use serde_json::json;
///
/// let tree = Node::from(json!({"a": {"b": 1, "c": [1, 2]}, "d": 2}));
/// let flat = flatten(tree.as_map().unwrap());
/// assert_eq!(Node::from(flat), Node::from(json!({"a.b": 1, "a.c": [1, 2], "d": 2})));
/// ```
pub fn flatten(tree: &NodeMap) -> NodeMap {
    flatten_with(tree, &FlattenOptions::default())
}

/// [`flatten`] with a custom separator and key prefix.
pub fn flatten_with(tree: &NodeMap, options: &FlattenOptions) -> NodeMap {
    let mut out = NodeMap::new();
    flatten_into(tree, &options.prefix, options, &mut out);
    out
}

fn flatten_into(tree: &NodeMap, prefix: &str, options: &FlattenOptions, out: &mut NodeMap) {
    for (key, value) in tree {
        let joined = options.join(prefix, key);
        match value {
            Node::Map(child) => flatten_into(child, &joined, options, out),
            leaf => {
                out.insert(joined, leaf.clone());
            }
        }
    }
}

/// Rebuild nested maps from `.`-joined keys.
///
/// Keys sharing a prefix extend the same nested map. When a key needs to pass
/// through a position that already holds a leaf, the leaf is replaced by a
/// map.
///
/// # Example
///
/// ```
/// use dict_utils::{unflatten, Node};
/// use serde_json::json;
///
/// let flat = Node::from(json!({"a.b": 1, "a.c": 2}));
/// let tree = unflatten(flat.as_map().unwrap());
/// assert_eq!(Node::from(tree), Node::from(json!({"a": {"b": 1, "c": 2}})));
/// ```
pub fn unflatten(flat: &NodeMap) -> NodeMap {
    unflatten_with(flat, &FlattenOptions::default())
}

/// [`unflatten`] with a custom separator.
pub fn unflatten_with(flat: &NodeMap, options: &FlattenOptions) -> NodeMap {
    let mut result = NodeMap::new();
    for (key, value) in flat {
        let parts: Vec<&str> = if options.separator.is_empty() {
            vec![key.as_str()]
        } else {
            key.split(options.separator.as_str()).collect()
        };
        let Some((last, parents)) = parts.split_last() else {
            continue;
        };
        let mut target = &mut result;
        for part in parents {
            let slot = target.entry(part.to_string()).or_insert_with(Node::map);
            target = ensure_map(slot);
        }
        target.insert(last.to_string(), value.clone());
    }
    result
}

/// The map in `slot`, replacing a leaf with an empty map first.
fn ensure_map(slot: &mut Node) -> &mut NodeMap {
    match slot {
        Node::Map(map) => map,
        leaf => {
            *leaf = Node::map();
            ensure_map(leaf)
        }
    }
}

/// Drop empty entries from a tree, bottom-up.
///
/// An entry goes when its value is `null`, an empty string, an empty sequence
/// or an empty map. Children are compacted first and the test applies to the
/// compacted value, so a map emptied by compaction is dropped too. Non-map
/// input is returned unchanged.
///
/// # Example
///
/// ```
/// use dict_utils::{compact, Node};
/// use serde_json::json;
///
/// let tree = Node::from(json!({"a": null, "b": 1, "c": {"d": ""}, "e": []}));
/// assert_eq!(compact(&tree), Node::from(json!({"b": 1})));
/// ```
pub fn compact(node: &Node) -> Node {
    match node {
        Node::Map(map) => Node::Map(compact_map(map)),
        other => other.clone(),
    }
}

/// [`compact`] for a map.
pub fn compact_map(map: &NodeMap) -> NodeMap {
    map.iter()
        .filter_map(|(key, value)| {
            let value = compact(value);
            (!is_blank(&value)).then(|| (key.clone(), value))
        })
        .collect()
}

fn is_blank(node: &Node) -> bool {
    match node {
        Node::Null => true,
        Node::String(s) => s.is_empty(),
        Node::Seq(items) => items.is_empty(),
        Node::Map(map) => map.is_empty(),
        _ => false,
    }
}

/// Nesting depth counted in map levels.
///
/// Non-maps and empty maps have depth 0.
///
/// # Example
///
/// ```
/// use dict_utils::{depth, Node};
/// use serde_json::json;
///
/// assert_eq!(depth(&Node::from(json!({"a": {"b": {"c": 1}}}))), 3);
/// assert_eq!(depth(&Node::from(json!({}))), 0);
/// ```
pub fn depth(node: &Node) -> usize {
    match node {
        Node::Map(map) if !map.is_empty() => {
            1 + map
                .values()
                .filter(|value| value.is_map())
                .map(depth)
                .max()
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Every key path reachable through maps, parents before children.
///
/// # Example
///
/// ```
/// use dict_utils::{nested_keys, Node};
/// use serde_json::json;
///
/// let tree = Node::from(json!({"a": {"b": 1}, "c": 2}));
/// assert_eq!(nested_keys(tree.as_map().unwrap()), vec!["a", "a.b", "c"]);
/// ```
pub fn nested_keys(tree: &NodeMap) -> Vec<String> {
    nested_keys_with(tree, &FlattenOptions::default())
}

/// [`nested_keys`] with a custom separator and prefix.
pub fn nested_keys_with(tree: &NodeMap, options: &FlattenOptions) -> Vec<String> {
    let mut keys = Vec::new();
    collect_keys(tree, &options.prefix, options, &mut keys);
    keys
}

fn collect_keys(tree: &NodeMap, prefix: &str, options: &FlattenOptions, keys: &mut Vec<String>) {
    for (key, value) in tree {
        let full = options.join(prefix, key);
        if let Node::Map(child) = value {
            keys.push(full.clone());
            collect_keys(child, &full, options, keys);
        } else {
            keys.push(full);
        }
    }
}

/// Rename every key at every level with `rename`.
///
/// When two keys of the same map rename to the same string, the later value
/// wins and keeps the earlier position.
pub fn replace_keys<F>(tree: &NodeMap, mut rename: F) -> NodeMap
where
    F: FnMut(&str) -> String,
{
    replace_keys_inner(tree, &mut rename)
}

fn replace_keys_inner<F>(tree: &NodeMap, rename: &mut F) -> NodeMap
where
    F: FnMut(&str) -> String,
{
    let mut out = NodeMap::with_capacity(tree.len());
    for (key, value) in tree {
        let key = rename(key.as_str());
        let value = match value {
            Node::Map(child) => Node::Map(replace_keys_inner(child, rename)),
            leaf => leaf.clone(),
        };
        out.insert(key, value);
    }
    out
}

/// Transform every non-map value with `f`, keeping the map structure.
///
/// `f` never sees a map. Sequences are passed to `f` whole.
pub fn map_values<F>(tree: &NodeMap, mut f: F) -> NodeMap
where
    F: FnMut(&Node) -> Node,
{
    map_values_inner(tree, &mut f)
}

fn map_values_inner<F>(tree: &NodeMap, f: &mut F) -> NodeMap
where
    F: FnMut(&Node) -> Node,
{
    tree.iter()
        .map(|(key, value)| {
            let value = match value {
                Node::Map(child) => Node::Map(map_values_inner(child, f)),
                leaf => f(leaf),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Keep only the top-level entries whose key is listed in `keep`.
pub fn filter_keys<I, K>(map: &NodeMap, keep: I) -> NodeMap
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let keep: HashSet<String> = keep.into_iter().map(|k| k.as_ref().to_string()).collect();
    map.iter()
        .filter(|(key, _)| keep.contains(key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Swap keys and values.
///
/// Only scalars can become keys. Their text form is used: strings as is,
/// other scalars as JSON (`1`, `true`, `null`). Entries holding a sequence,
/// map or record are skipped. On collision the later entry wins.
///
/// # Example
///
/// ```
/// use dict_utils::{invert, Node};
/// use serde_json::json;
///
/// let map = Node::from(json!({"a": 1, "b": "x", "c": [1]}));
/// let inverted = invert(map.as_map().unwrap());
/// assert_eq!(Node::from(inverted), Node::from(json!({"1": "a", "x": "b"})));
/// ```
pub fn invert(map: &NodeMap) -> NodeMap {
    map.iter()
        .filter_map(|(key, value)| Some((scalar_key(value)?, Node::String(key.clone()))))
        .collect()
}

fn scalar_key(node: &Node) -> Option<String> {
    match node {
        Node::String(s) => Some(s.clone()),
        Node::Null | Node::Bool(_) | Node::Number(_) => Some(node.to_string()),
        Node::Seq(_) | Node::Map(_) | Node::Object(_) => None,
    }
}

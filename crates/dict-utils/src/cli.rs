//! Logic behind the `dict-path` binary.
//!
//! Each function takes the input document as JSON text and returns the
//! pretty-printed JSON to write to stdout, so it can be tested without
//! spawning a process.

use thiserror::Error;

use crate::node::{Node, NodeKind, NodeMap};
use crate::options::FlattenOptions;
use crate::{access, combine, mutate, transform, DictError};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Dict(#[from] DictError),
    #[error("path `{0}` not found")]
    NotFound(String),
    #[error("expected the document to be a map, found a {0}")]
    NotAMap(NodeKind),
    #[error("invalid assignment `{0}`, expected PATH=VALUE")]
    InvalidAssignment(String),
}

fn parse(doc_json: &str) -> Result<Node, CliError> {
    Ok(serde_json::from_str(doc_json)?)
}

fn parse_map(doc_json: &str) -> Result<NodeMap, CliError> {
    match parse(doc_json)? {
        Node::Map(map) => Ok(map),
        other => Err(CliError::NotAMap(other.kind())),
    }
}

fn render(node: &Node) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(node)?)
}

fn render_map(map: NodeMap) -> Result<String, CliError> {
    render(&Node::Map(map))
}

// ── Access ────────────────────────────────────────────────────────────────

/// Look up `path`. Without a default a missing path is an error.
pub fn get(doc_json: &str, path: &str, default_json: Option<&str>) -> Result<String, CliError> {
    let doc = parse(doc_json)?;
    match default_json {
        Some(default_json) => {
            let default = parse(default_json)?;
            render(access::get_or(&doc, path, &default))
        }
        None => match access::get(&doc, path) {
            Some(found) => render(found),
            None => Err(CliError::NotFound(path.to_string())),
        },
    }
}

/// `true` or `false`.
pub fn has(doc_json: &str, path: &str) -> Result<String, CliError> {
    let doc = parse(doc_json)?;
    Ok(access::has(&doc, path).to_string())
}

/// Every value stored under `key`, as a JSON array.
pub fn collect(doc_json: &str, key: &str) -> Result<String, CliError> {
    let doc = parse(doc_json)?;
    let found = access::collect_by_key(&doc, key).into_iter().cloned().collect();
    render(&Node::Seq(found))
}

// ── Mutation ──────────────────────────────────────────────────────────────

/// Apply `PATH=VALUE` assignments in order.
///
/// `VALUE` is parsed as JSON; text that is not valid JSON is stored as a
/// string.
pub fn set(doc_json: &str, assignments: &[String]) -> Result<String, CliError> {
    let mut doc = parse(doc_json)?;
    let mut pairs = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        let (path, raw) = assignment
            .split_once('=')
            .ok_or_else(|| CliError::InvalidAssignment(assignment.clone()))?;
        let value = serde_json::from_str::<Node>(raw).unwrap_or_else(|_| Node::from(raw));
        pairs.push((path, value));
    }
    mutate::set_many(&mut doc, pairs)?;
    render(&doc)
}

pub fn delete(doc_json: &str, path: &str) -> Result<String, CliError> {
    let mut doc = parse(doc_json)?;
    mutate::delete(&mut doc, path);
    render(&doc)
}

// ── Transforms ────────────────────────────────────────────────────────────

pub fn flatten(doc_json: &str, options: &FlattenOptions) -> Result<String, CliError> {
    render_map(transform::flatten_with(&parse_map(doc_json)?, options))
}

pub fn unflatten(doc_json: &str, options: &FlattenOptions) -> Result<String, CliError> {
    render_map(transform::unflatten_with(&parse_map(doc_json)?, options))
}

pub fn compact(doc_json: &str) -> Result<String, CliError> {
    render(&transform::compact(&parse(doc_json)?))
}

pub fn depth(doc_json: &str) -> Result<String, CliError> {
    Ok(transform::depth(&parse(doc_json)?).to_string())
}

pub fn keys(doc_json: &str, options: &FlattenOptions) -> Result<String, CliError> {
    let keys = transform::nested_keys_with(&parse_map(doc_json)?, options);
    render(&Node::Seq(keys.into_iter().map(Node::from).collect()))
}

// ── Combine ───────────────────────────────────────────────────────────────

/// Merge `other_json` over the document.
pub fn merge(doc_json: &str, other_json: &str) -> Result<String, CliError> {
    let merged = combine::merge(&parse_map(doc_json)?, &parse_map(other_json)?);
    render_map(merged)
}

/// Shallow diff from the document to `other_json`.
pub fn diff(doc_json: &str, other_json: &str) -> Result<String, CliError> {
    let diff = combine::diff(&parse_map(doc_json)?, &parse_map(other_json)?);
    Ok(serde_json::to_string_pretty(&diff)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn value(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_get() {
        let out = get(r#"{"a": [{"b": 5}]}"#, "a.0.b", None).unwrap();
        assert_eq!(out, "5");
    }

    #[test]
    fn test_get_missing() {
        let err = get(r#"{"a": 1}"#, "b", None).unwrap_err();
        assert!(matches!(err, CliError::NotFound(p) if p == "b"));
        assert_eq!(get(r#"{"a": 1}"#, "b", Some("0")).unwrap(), "0");
    }

    #[test]
    fn test_has() {
        assert_eq!(has(r#"{"a": null}"#, "a").unwrap(), "true");
        assert_eq!(has(r#"{"a": null}"#, "b").unwrap(), "false");
    }

    #[test]
    fn test_collect() {
        let out = collect(r#"{"a": 1, "b": [{"a": 2}]}"#, "a").unwrap();
        assert_eq!(value(&out), json!([1, 2]));
    }

    #[test]
    fn test_set_parses_json_or_falls_back_to_string() {
        let assignments = vec!["a.b=1".to_string(), "a.c=hello".to_string(), "l.0={\"x\":true}".to_string()];
        let out = set("{}", &assignments).unwrap();
        assert_eq!(
            value(&out),
            json!({"a": {"b": 1, "c": "hello"}, "l": [{"x": true}]})
        );
    }

    #[test]
    fn test_set_errors() {
        let err = set("{}", &["novalue".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::InvalidAssignment(_)));
        let err = set(r#"{"a": {}}"#, &["a.0=1".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::Dict(DictError::TypeKind { .. })));
    }

    #[test]
    fn test_delete() {
        let out = delete(r#"{"a": {"b": 1, "c": 2}}"#, "a.b").unwrap();
        assert_eq!(value(&out), json!({"a": {"c": 2}}));
    }

    #[test]
    fn test_flatten_and_unflatten() {
        let options = FlattenOptions::default();
        let flat = flatten(r#"{"a": {"b": 1}}"#, &options).unwrap();
        assert_eq!(value(&flat), json!({"a.b": 1}));
        let tree = unflatten(&flat, &options).unwrap();
        assert_eq!(value(&tree), json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_flatten_rejects_non_map() {
        let err = flatten("[1]", &FlattenOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::NotAMap(NodeKind::Seq)));
    }

    #[test]
    fn test_compact_depth_keys() {
        assert_eq!(value(&compact(r#"{"a": null, "b": 1}"#).unwrap()), json!({"b": 1}));
        assert_eq!(depth(r#"{"a": {"b": 1}}"#).unwrap(), "2");
        let out = keys(r#"{"a": {"b": 1}}"#, &FlattenOptions::default()).unwrap();
        assert_eq!(value(&out), json!(["a", "a.b"]));
    }

    #[test]
    fn test_merge_and_diff() {
        let out = merge(r#"{"a": {"b": 1}}"#, r#"{"a": {"c": 2}}"#).unwrap();
        assert_eq!(value(&out), json!({"a": {"b": 1, "c": 2}}));
        let out = diff(r#"{"a": 1}"#, r#"{"a": 2, "b": 3}"#).unwrap();
        assert_eq!(
            value(&out),
            json!({"added": {"b": 3}, "removed": {}, "changed": {"a": [1, 2]}})
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(compact("{"), Err(CliError::Json(_))));
    }
}

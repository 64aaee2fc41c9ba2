//! The nested value model shared by every operation in the crate.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Number, Value};

use crate::record::{FieldAccess, Record};

/// String-keyed map of nodes. Iteration follows insertion order; equality
/// does not depend on it.
pub type NodeMap = IndexMap<String, Node>;

/// A value in a nested tree.
///
/// `Map` and `Seq` are the containers that path operations descend into and
/// mutate. `Object` is a read-only record: `get` can read its fields, but
/// nothing writes through it.
///
/// Equality is value equality: numbers compare by value whatever their
/// representation, maps ignore key order.
#[derive(Debug, Clone, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Seq(Vec<Node>),
    Map(NodeMap),
    Object(Record),
}

/// The variant tag of a [`Node`], used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Seq,
    Map,
    Object,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "bool",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Seq => "sequence",
            NodeKind::Map => "map",
            NodeKind::Object => "object",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Bool(_) => NodeKind::Bool,
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Seq(_) => NodeKind::Seq,
            Node::Map(_) => NodeKind::Map,
            Node::Object(_) => NodeKind::Object,
        }
    }

    /// An empty map node.
    pub fn map() -> Self {
        Node::Map(NodeMap::new())
    }

    /// An empty sequence node.
    pub fn seq() -> Self {
        Node::Seq(Vec::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    pub fn is_seq(&self) -> bool {
        matches!(self, Node::Seq(_))
    }

    /// True for the two kinds path mutation can descend into.
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Map(_) | Node::Seq(_))
    }

    pub fn as_map(&self) -> Option<&NodeMap> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut NodeMap> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Named field access, if this node offers it.
    ///
    /// Only `Object` does. Maps are addressed by key, not by field.
    pub fn as_field_access(&self) -> Option<&dyn FieldAccess> {
        match self {
            Node::Object(record) => Some(record),
            _ => None,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Null, Node::Null) => true,
            (Node::Bool(a), Node::Bool(b)) => a == b,
            (Node::Number(a), Node::Number(b)) => numbers_equal(a, b),
            (Node::String(a), Node::String(b)) => a == b,
            (Node::Seq(a), Node::Seq(b)) => a == b,
            (Node::Map(a), Node::Map(b)) => a == b,
            (Node::Object(a), Node::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// Integers compare exactly; once either side is a float both compare as `f64`.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        return match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        };
    }
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x == y,
        _ => a.as_u64().is_some() && a.as_u64() == b.as_u64(),
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// ── Conversions ───────────────────────────────────────────────────────────

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n),
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::Seq(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Node::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(b),
            Node::Number(n) => Value::Number(n),
            Node::String(s) => Value::String(s),
            Node::Seq(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Node::Map(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
            Node::Object(record) => Value::Object(
                record
                    .into_fields()
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::Number(n.into())
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Number(n.into())
    }
}

impl From<u64> for Node {
    fn from(n: u64) -> Self {
        Node::Number(n.into())
    }
}

impl From<usize> for Node {
    fn from(n: usize) -> Self {
        Node::Number((n as u64).into())
    }
}

/// Non-finite floats become `Null`, matching `serde_json::Value`.
impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Node::Number).unwrap_or(Node::Null)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Seq(items)
    }
}

impl From<NodeMap> for Node {
    fn from(map: NodeMap) -> Self {
        Node::Map(map)
    }
}

impl From<Record> for Node {
    fn from(record: Record) -> Self {
        Node::Object(record)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Number(n) => n.serialize(serializer),
            Node::String(s) => serializer.serialize_str(s),
            Node::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Map(map) => serialize_entries(serializer, map.len(), map.iter()),
            Node::Object(record) => serialize_entries(serializer, record.len(), record.iter()),
        }
    }
}

fn serialize_entries<'a, S: Serializer>(
    serializer: S,
    len: usize,
    entries: impl Iterator<Item = (&'a String, &'a Node)>,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(len))?;
    for (key, value) in entries {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

/// Deserialization goes through `serde_json::Value`, so it never yields `Object`.
impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Node::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_key_order() {
        let node = Node::from(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<&str> = node.as_map().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_json_roundtrip() {
        let value = json!({"a": [1, "two", null, {"b": true}], "c": 1.5});
        let node = Node::from(value.clone());
        assert_eq!(Value::from(node), value);
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let a = Node::from(json!({"x": 1, "y": 2}));
        let b = Node::from(json!({"y": 2, "x": 1}));
        assert_eq!(a, b);
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert_eq!(Node::from(json!(1)), Node::from(json!(1.0)));
        assert_eq!(Node::from(json!(0)), Node::from(json!(-0.0)));
        assert_eq!(Node::from(json!(u64::MAX)), Node::from(json!(u64::MAX)));
        assert_eq!(Node::from(json!([1, {"a": 2}])), Node::from(json!([1.0, {"a": 2.0}])));
        assert_ne!(Node::from(json!(1)), Node::from(json!(1.5)));
        assert_ne!(Node::from(json!(-1)), Node::from(json!(u64::MAX)));
        assert_ne!(Node::from(json!(1)), Node::from(json!("1")));
        assert_ne!(Node::from(json!(0)), Node::Null);
    }

    #[test]
    fn test_kind() {
        assert_eq!(Node::Null.kind(), NodeKind::Null);
        assert_eq!(Node::from(1).kind(), NodeKind::Number);
        assert_eq!(Node::seq().kind(), NodeKind::Seq);
        assert_eq!(Node::map().kind(), NodeKind::Map);
        assert_eq!(NodeKind::Seq.to_string(), "sequence");
    }

    #[test]
    fn test_serialize_record_as_object() {
        let record = Record::new().with_field("a", 1).with_field("b", "x");
        let text = serde_json::to_string(&Node::Object(record)).unwrap();
        assert_eq!(text, r#"{"a":1,"b":"x"}"#);
    }

    #[test]
    fn test_deserialize() {
        let node: Node = serde_json::from_str(r#"{"a": [1, 2]}"#).unwrap();
        assert_eq!(node, Node::from(json!({"a": [1, 2]})));
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert_eq!(Node::from(f64::NAN), Node::Null);
    }

    #[test]
    fn test_display_is_compact_json() {
        assert_eq!(Node::from(json!({"a": [1]})).to_string(), r#"{"a":[1]}"#);
    }
}

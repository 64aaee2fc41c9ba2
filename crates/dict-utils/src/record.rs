//! Fixed-shape records and their conversion to and from maps.
//!
//! A [`Record`] is the `Object` side of the node model: a value that exposes
//! named fields. Path lookups fall back to [`FieldAccess`] when the current
//! node is neither a map nor a sequence.

use crate::node::{Node, NodeMap};

/// Read access to named fields.
pub trait FieldAccess {
    /// The value of field `name`, if the record has one.
    fn field(&self, name: &str) -> Option<&Node>;

    /// Field names in declaration order.
    fn field_names(&self) -> Vec<&str>;
}

/// A record with a fixed set of named fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: NodeMap,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field declaration. A repeated name replaces the value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Node>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.fields.iter()
    }

    pub fn into_fields(self) -> NodeMap {
        self.fields
    }
}

impl FieldAccess for Record {
    fn field(&self, name: &str) -> Option<&Node> {
        self.fields.get(name)
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}

impl FromIterator<(String, Node)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Converts a map into a record. Nested maps become nested records;
/// sequences and scalars are kept as they are.
pub fn map_to_record(map: &NodeMap) -> Record {
    map.iter()
        .map(|(key, value)| {
            let value = match value {
                Node::Map(child) => Node::Object(map_to_record(child)),
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Converts a record back into a map. Nested records become nested maps;
/// sequences and scalars are kept as they are.
pub fn record_to_map(record: &Record) -> NodeMap {
    record
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Node::Object(child) => Node::Map(record_to_map(child)),
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}

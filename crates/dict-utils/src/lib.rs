//! Dot-path utilities for nested map/sequence trees.
//!
//! Trees are [`Node`] values: maps, sequences, read-only records and scalars.
//! Paths are `.`-separated strings where an all-digit segment indexes a
//! sequence and any other segment names a map key.
//!
//! - reading: [`get`], [`get_or`], [`has`], [`collect_by_key`]
//! - writing: [`set`], [`set_many`], [`delete`] (in place)
//! - transforms: [`flatten`], [`unflatten`], [`compact`], [`depth`],
//!   [`nested_keys`], [`replace_keys`], [`map_values`], [`filter_keys`],
//!   [`invert`] (new structures)
//! - combining: [`merge`] (new structure), [`deep_update`] (in place), [`diff`]
//!
//! # Example
//!
//! ```
//! use dict_utils::{flatten, get, set, Node};
//! use serde_json::json;
//!
//! let mut doc = Node::from(json!({"server": {"port": 8080}}));
//! set(&mut doc, "server.hosts.0", Node::from("localhost")).unwrap();
//!
//! assert_eq!(get(&doc, "server.hosts.0"), Some(&Node::from("localhost")));
//! assert_eq!(
//!     Node::from(flatten(doc.as_map().unwrap())),
//!     Node::from(json!({"server.port": 8080, "server.hosts": ["localhost"]}))
//! );
//! ```

pub mod access;
pub mod cli;
pub mod combine;
pub mod error;
pub mod mutate;
pub mod node;
pub mod options;
pub mod path;
pub mod record;
pub mod transform;

pub use access::{collect_by_key, get, get_or, has};
pub use combine::{deep_update, diff, merge, Diff};
pub use error::{DictError, Result};
pub use mutate::{delete, set, set_many, MAX_SEQ_GROWTH};
pub use node::{Node, NodeKind, NodeMap};
pub use options::FlattenOptions;
pub use path::{is_all_digits, join_path, split_path, Segment};
pub use record::{map_to_record, record_to_map, FieldAccess, Record};
pub use transform::{
    compact, compact_map, depth, filter_keys, flatten, flatten_with, invert, map_values,
    nested_keys, nested_keys_with, replace_keys, unflatten, unflatten_with,
};

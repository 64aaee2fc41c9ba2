use thiserror::Error;

use crate::node::NodeKind;

/// Errors raised by path mutation.
///
/// A missing path is never an error: lookups return `None` or the default,
/// and deletes of absent paths do nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DictError {
    /// A non-terminal segment needs a container of one kind but the existing
    /// node is another.
    #[error("path `{path}`: segment `{segment}` expects a {expected}, found a {found}")]
    TypeKind {
        path: String,
        segment: String,
        expected: NodeKind,
        found: NodeKind,
    },
    /// A digit segment that overflows `usize` or lies too far past the end of
    /// the sequence it grows.
    #[error("path `{path}`: index `{segment}` is out of range")]
    IndexOverflow { path: String, segment: String },
}

pub type Result<T, E = DictError> = std::result::Result<T, E>;

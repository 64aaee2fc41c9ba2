//! Write access by dot path: `set` with auto-vivification, and `delete`.

use tracing::{debug, trace};

use crate::error::{DictError, Result};
use crate::node::Node;
use crate::path::{split_path, Segment};

/// Most placeholders a single index segment may append to a sequence.
pub const MAX_SEQ_GROWTH: usize = 1 << 16;

/// Set a value in a tree by dot path, creating missing containers.
///
/// Walking the path, each segment must find a container of its own kind: a
/// digit segment needs a sequence, any other segment needs a map. A missing
/// or scalar child is replaced by an empty container whose kind comes from
/// the *next* segment. Sequences grow by appending empty containers until the
/// index is in range. The last segment overwrites whatever is there.
///
/// Returns the root on success.
///
/// # Errors
///
/// [`DictError::TypeKind`] when an existing container has the wrong kind for
/// the segment addressing it, [`DictError::IndexOverflow`] when a digit
/// segment does not fit in `usize` or would append [`MAX_SEQ_GROWTH`] or more
/// placeholders. Changes made before the failing segment stay in place.
///
/// # Example
///
/// ```
/// use dict_utils::{set, Node};
/// use serde_json::json;
///
/// let mut doc = Node::from(json!({}));
/// set(&mut doc, "a.0.b", Node::from(1)).unwrap();
/// assert_eq!(doc, Node::from(json!({"a": [{"b": 1}]})));
/// ```
pub fn set<'a>(root: &'a mut Node, path: &str, value: Node) -> Result<&'a mut Node> {
    assign(root, path, value)?;
    Ok(root)
}

/// Apply several `(path, value)` writes in order to the same root.
///
/// Not transactional: if a later write fails, earlier ones remain applied.
///
/// # Example
///
/// ```
/// use dict_utils::{set_many, Node};
/// use serde_json::json;
///
/// let mut doc = Node::map();
/// set_many(&mut doc, [("a.b.c", Node::from(1)), ("a.b.d", Node::from(2))]).unwrap();
/// assert_eq!(doc, Node::from(json!({"a": {"b": {"c": 1, "d": 2}}})));
/// ```
pub fn set_many<'a, P, I>(root: &'a mut Node, pairs: I) -> Result<&'a mut Node>
where
    P: AsRef<str>,
    I: IntoIterator<Item = (P, Node)>,
{
    for (path, value) in pairs {
        assign(root, path.as_ref(), value)?;
    }
    Ok(root)
}

fn assign(root: &mut Node, path: &str, value: Node) -> Result<()> {
    let segments = split_path(path);
    let mut current = root;
    for (i, segment) in segments.iter().enumerate() {
        let next = segments.get(i + 1);
        let slot = child_slot(current, segment, next, path)?;
        match next {
            None => {
                *slot = value;
                return Ok(());
            }
            Some(next) => {
                if !slot.is_container() {
                    trace!(
                        path,
                        segment = segment.as_str(),
                        kind = %next.container_kind(),
                        "creating container"
                    );
                    *slot = next.empty_container();
                }
                current = slot;
            }
        }
    }
    Ok(())
}

/// The child of `node` addressed by `segment`, created if missing.
fn child_slot<'a>(
    node: &'a mut Node,
    segment: &Segment<'_>,
    next: Option<&Segment<'_>>,
    path: &str,
) -> Result<&'a mut Node> {
    let found = node.kind();
    match (segment, node) {
        (Segment::Index(raw), Node::Seq(items)) => {
            let limit = items.len().saturating_add(MAX_SEQ_GROWTH);
            let Some(index) = segment.index().filter(|&index| index < limit) else {
                debug!(path, segment = *raw, len = items.len(), "set failed: index out of range");
                return Err(DictError::IndexOverflow {
                    path: path.to_string(),
                    segment: raw.to_string(),
                });
            };
            while items.len() <= index {
                items.push(placeholder(next));
            }
            Ok(&mut items[index])
        }
        (Segment::Field(name), Node::Map(map)) => {
            Ok(map.entry(name.to_string()).or_insert(Node::Null))
        }
        _ => {
            debug!(
                path,
                segment = segment.as_str(),
                expected = %segment.container_kind(),
                %found,
                "set failed: container kind mismatch"
            );
            Err(DictError::TypeKind {
                path: path.to_string(),
                segment: segment.as_str().to_string(),
                expected: segment.container_kind(),
                found,
            })
        }
    }
}

/// Filler for sequence growth: a map when the next segment is a field,
/// otherwise a sequence (including past the last segment).
fn placeholder(next: Option<&Segment<'_>>) -> Node {
    match next {
        Some(Segment::Field(_)) => Node::map(),
        _ => Node::seq(),
    }
}

/// Delete the value at a dot path.
///
/// Absent paths are a no-op. A map entry is removed; a sequence slot is
/// overwritten with `Null` so the indexes of later items do not shift.
///
/// # Example
///
/// ```
/// use dict_utils::{delete, Node};
/// use serde_json::json;
///
/// let mut doc = Node::from(json!({"a": {"b": {"c": 1}}, "l": [1, 2, 3]}));
/// delete(&mut doc, "a.b.c");
/// delete(&mut doc, "l.1");
/// assert_eq!(doc, Node::from(json!({"a": {"b": {}}, "l": [1, null, 3]})));
/// ```
pub fn delete(root: &mut Node, path: &str) {
    let segments = split_path(path);
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = root;
    for segment in parents {
        match descend_mut(current, segment) {
            Some(next) => current = next,
            None => {
                trace!(path, segment = segment.as_str(), "delete: path absent");
                return;
            }
        }
    }

    match current {
        Node::Map(map) => {
            map.shift_remove(last.as_str());
        }
        Node::Seq(items) => {
            if let Some(slot) = last.index().and_then(|index| items.get_mut(index)) {
                *slot = Node::Null;
            }
        }
        _ => {}
    }
}

fn descend_mut<'a>(node: &'a mut Node, segment: &Segment<'_>) -> Option<&'a mut Node> {
    match node {
        Node::Map(map) => map.get_mut(segment.as_str()),
        Node::Seq(items) => items.get_mut(segment.index()?),
        _ => None,
    }
}

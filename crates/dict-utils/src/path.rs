//! Dot-path syntax.
//!
//! A path is a string of `.`-separated segments. There is no escaping. A
//! segment made only of ASCII digits is an index into a sequence, anything
//! else is a map key. The kind comes from the text alone, never from the
//! container being addressed. Reads look any segment up as a map key, but a
//! write cannot create or replace a map entry named `"0"`.

use crate::node::{Node, NodeKind};

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// One segment of a dot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A map key.
    Field(&'a str),
    /// A sequence index, still in its textual form.
    Index(&'a str),
}

impl<'a> Segment<'a> {
    /// Classifies a raw segment by its text.
    pub fn parse(raw: &'a str) -> Self {
        if is_all_digits(raw) {
            Segment::Index(raw)
        } else {
            Segment::Field(raw)
        }
    }

    pub fn as_str(&self) -> &'a str {
        match *self {
            Segment::Field(s) | Segment::Index(s) => s,
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    /// The numeric index. `None` for fields and for digit strings that
    /// overflow `usize`.
    pub fn index(&self) -> Option<usize> {
        match self {
            Segment::Index(raw) => raw.parse().ok(),
            Segment::Field(_) => None,
        }
    }

    /// The container kind this segment addresses.
    pub fn container_kind(&self) -> NodeKind {
        match self {
            Segment::Index(_) => NodeKind::Seq,
            Segment::Field(_) => NodeKind::Map,
        }
    }

    /// A fresh empty container of [`Segment::container_kind`].
    pub fn empty_container(&self) -> Node {
        match self {
            Segment::Index(_) => Node::seq(),
            Segment::Field(_) => Node::map(),
        }
    }
}

/// Splits a path into segments.
///
/// Never returns an empty vector: `""` is one empty field segment.
///
/// # Example
///
/// ```
/// use dict_utils::path::{split_path, Segment};
///
/// assert_eq!(
///     split_path("a.0.b"),
///     vec![Segment::Field("a"), Segment::Index("0"), Segment::Field("b")]
/// );
/// assert_eq!(split_path(""), vec![Segment::Field("")]);
/// ```
pub fn split_path(path: &str) -> Vec<Segment<'_>> {
    path.split(SEPARATOR).map(Segment::parse).collect()
}

/// Joins segments back into a path string.
pub fn join_path(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(segment.as_str());
    }
    out
}

/// Check if a string is non-empty and consists only of ASCII digits.
pub fn is_all_digits(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_all_digits() {
        assert!(is_all_digits("0"));
        assert!(is_all_digits("123"));
        assert!(is_all_digits("007"));
        assert!(!is_all_digits(""));
        assert!(!is_all_digits("-1"));
        assert!(!is_all_digits("1.5"));
        assert!(!is_all_digits("1a"));
        assert!(!is_all_digits("٣"));
    }

    #[test]
    fn test_split_path() {
        assert_eq!(
            split_path("a.b.c"),
            vec![Segment::Field("a"), Segment::Field("b"), Segment::Field("c")]
        );
        assert_eq!(split_path("0"), vec![Segment::Index("0")]);
        assert_eq!(
            split_path("a..b"),
            vec![Segment::Field("a"), Segment::Field(""), Segment::Field("b")]
        );
    }

    #[test]
    fn test_segment_index() {
        assert_eq!(Segment::parse("007").index(), Some(7));
        assert_eq!(Segment::parse("x").index(), None);
        assert_eq!(Segment::parse("99999999999999999999999999").index(), None);
        assert!(Segment::parse("99999999999999999999999999").is_index());
    }

    #[test]
    fn test_container_kind() {
        assert_eq!(Segment::parse("1").container_kind(), NodeKind::Seq);
        assert_eq!(Segment::parse("a").container_kind(), NodeKind::Map);
        assert_eq!(Segment::parse("1").empty_container(), Node::seq());
        assert_eq!(Segment::parse("a").empty_container(), Node::map());
    }

    #[test]
    fn test_join_roundtrip() {
        for path in ["", "a", "a.b", "a.0.b", "a..b", "."] {
            assert_eq!(join_path(&split_path(path)), path);
        }
    }
}

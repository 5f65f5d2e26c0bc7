//! Node paths: stable addresses from the comparison root
//!
//! A [`NodePath`] is an ordered sequence of [`PathElement`]s. Sequence
//! elements are addressed by their canonical content representation rather
//! than by position, so the same rendered path survives reorderings.
//!
//! Rendering grammar (round-trippable via [`NodePath::parse`]):
//!
//! - empty path → `/`
//! - composite member → `/name`
//! - sequence element after a named segment → `name[repr]`
//! - sequence element elsewhere (root, or after another element) → `/[repr]`
//! - map entry → `/{repr}`
//!
//! Examples: `/locations[Location{address='x'}]/address`, `/[c]`,
//! `/[[a, b]]/[c]`, `/{key}`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DiffError;

/// One element of a node path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathElement {
    /// Named member of a composite
    Field(String),
    /// Sequence element, addressed by canonical content representation
    Item(String),
    /// Map entry, addressed by the key's canonical representation
    Key(String),
}

/// Immutable address of a node relative to the comparison root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NodePath {
    elements: Vec<PathElement>,
}

impl NodePath {
    /// The empty path, rendered as `/`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from elements.
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }

    /// True for the empty path.
    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    /// The element sequence.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// The last element, if any.
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True if the path has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Extend with an arbitrary element.
    pub fn child(&self, element: PathElement) -> Self {
        let mut elements = self.elements.clone();
        elements.push(element);
        Self { elements }
    }

    /// Extend with a composite member name.
    pub fn field(&self, name: impl Into<String>) -> Self {
        self.child(PathElement::Field(name.into()))
    }

    /// Extend with a sequence element representation.
    pub fn item(&self, repr: impl Into<String>) -> Self {
        self.child(PathElement::Item(repr.into()))
    }

    /// Extend with a map key representation.
    pub fn key(&self, repr: impl Into<String>) -> Self {
        self.child(PathElement::Key(repr.into()))
    }

    /// Prefix relation: true if `self` begins with all of `prefix`'s elements.
    ///
    /// Every path starts with the root path.
    pub fn starts_with(&self, prefix: &NodePath) -> bool {
        self.elements.len() >= prefix.elements.len()
            && self.elements[..prefix.elements.len()] == prefix.elements[..]
    }

    /// Parse a rendered path back into its element sequence.
    ///
    /// Accepts exactly the grammar produced by `Display`. Element
    /// representations must carry balanced brackets/braces (canonical
    /// representations always do).
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::InvalidPath`] if the expression does not start
    /// with `/`, contains an unterminated `[`/`{` group, or has an empty
    /// member name.
    pub fn parse(expression: &str) -> Result<Self, DiffError> {
        let invalid = |reason: &str| DiffError::InvalidPath {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        if expression == "/" {
            return Ok(Self::root());
        }
        if !expression.starts_with('/') {
            return Err(invalid("path must start with '/'"));
        }

        let chars: Vec<char> = expression.chars().collect();
        let mut elements = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            match chars[i] {
                '/' => {
                    i += 1;
                    if i >= chars.len() {
                        return Err(invalid("trailing '/'"));
                    }
                    match chars[i] {
                        '[' => {
                            let (repr, next) = read_delimited(&chars, i, '[', ']')
                                .ok_or_else(|| invalid("unterminated '[' group"))?;
                            elements.push(PathElement::Item(repr));
                            i = next;
                        }
                        '{' => {
                            let (repr, next) = read_delimited(&chars, i, '{', '}')
                                .ok_or_else(|| invalid("unterminated '{' group"))?;
                            elements.push(PathElement::Key(repr));
                            i = next;
                        }
                        _ => {
                            let start = i;
                            while i < chars.len() && chars[i] != '/' && chars[i] != '[' {
                                i += 1;
                            }
                            let name: String = chars[start..i].iter().collect();
                            if name.is_empty() {
                                return Err(invalid("empty member name"));
                            }
                            elements.push(PathElement::Field(name));
                        }
                    }
                }
                '[' => {
                    // item appended directly after a named segment
                    let (repr, next) = read_delimited(&chars, i, '[', ']')
                        .ok_or_else(|| invalid("unterminated '[' group"))?;
                    elements.push(PathElement::Item(repr));
                    i = next;
                }
                _ => return Err(invalid("expected '/' or '[' between elements")),
            }
        }

        Ok(Self { elements })
    }
}

/// Read a balanced `open…close` group starting at `start` (which must hold
/// `open`). Returns the inner text and the index just past the closing
/// delimiter.
fn read_delimited(
    chars: &[char],
    start: usize,
    open: char,
    close: char,
) -> Option<(String, usize)> {
    let mut depth = 0usize;
    let mut inner = String::new();
    for (offset, &c) in chars[start..].iter().enumerate() {
        if c == open {
            depth += 1;
            if depth == 1 {
                continue;
            }
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some((inner, start + offset + 1));
            }
        }
        inner.push(c);
    }
    None
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return f.write_str("/");
        }
        let mut previous: Option<&PathElement> = None;
        for element in &self.elements {
            match element {
                PathElement::Field(name) => {
                    write!(f, "/{}", name)?;
                }
                PathElement::Item(repr) => {
                    // An item attaches to its named segment; elsewhere it
                    // forms a segment of its own.
                    if matches!(previous, Some(PathElement::Field(_))) {
                        write!(f, "[{}]", repr)?;
                    } else {
                        write!(f, "/[{}]", repr)?;
                    }
                }
                PathElement::Key(repr) => {
                    write!(f, "/{{{}}}", repr)?;
                }
            }
            previous = Some(element);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_as_slash() {
        assert_eq!(NodePath::root().to_string(), "/");
        assert!(NodePath::root().is_root());
    }

    #[test]
    fn test_field_rendering() {
        let path = NodePath::root().field("locations").field("address");
        assert_eq!(path.to_string(), "/locations/address");
    }

    #[test]
    fn test_item_attaches_to_named_segment() {
        let path = NodePath::root()
            .field("locations")
            .item("Location{address='x'}")
            .field("address");
        assert_eq!(path.to_string(), "/locations[Location{address='x'}]/address");
    }

    #[test]
    fn test_item_at_root_forms_own_segment() {
        assert_eq!(NodePath::root().item("c").to_string(), "/[c]");
    }

    #[test]
    fn test_consecutive_items_are_separated() {
        let path = NodePath::root().item("[a, b]").item("c");
        assert_eq!(path.to_string(), "/[[a, b]]/[c]");
    }

    #[test]
    fn test_key_rendering() {
        assert_eq!(NodePath::root().key("key").to_string(), "/{key}");
        assert_eq!(
            NodePath::root().key("location").key("street").to_string(),
            "/{location}/{street}"
        );
    }

    #[test]
    fn test_starts_with() {
        let root = NodePath::root();
        let secret = root.field("secret");
        let nested = secret.field("token");

        assert!(nested.starts_with(&secret));
        assert!(nested.starts_with(&root));
        assert!(secret.starts_with(&root));
        assert!(!secret.starts_with(&nested));
        assert!(!root.field("other").starts_with(&secret));
    }

    #[test]
    fn test_equality_is_element_wise() {
        let a = NodePath::root().field("a").item("x");
        let b = NodePath::root().field("a").item("x");
        let c = NodePath::root().field("a").key("x");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_parse_round_trip() {
        let paths = [
            NodePath::root(),
            NodePath::root().field("name"),
            NodePath::root().item("c"),
            NodePath::root().item("[a, b]").item("c"),
            NodePath::root()
                .field("locations")
                .item("Location{address='x'}")
                .field("address"),
            NodePath::root().key("key").field("inner"),
        ];
        for path in paths {
            let rendered = path.to_string();
            let parsed = NodePath::parse(&rendered).unwrap();
            assert_eq!(parsed, path, "round trip failed for {}", rendered);
        }
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(NodePath::parse("name").is_err());
        assert!(NodePath::parse("/name/[unterminated").is_err());
        assert!(NodePath::parse("/{open").is_err());
        assert!(NodePath::parse("//").is_err());
    }
}

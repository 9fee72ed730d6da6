use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Node;

/// Coarse classification of a [`Node`].
///
/// Containment only special-cases [`Kind::Object`] and [`Kind::Array`];
/// every other kind is treated as an opaque comparable leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool,
    /// JSON number.
    Number,
    /// JSON string.
    String,
    /// JSON array.
    Array,
    /// JSON object (plain record).
    Object,
}

impl Kind {
    /// Indicates whether values of this kind have children.
    ///
    /// ```
    /// # use contains_core::Kind;
    /// assert!(Kind::Array.is_composite());
    /// assert!(!Kind::String.is_composite());
    /// ```
    #[must_use]
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

/// Classifies a node.
///
/// ```
/// # use contains_core::{classify, Kind, Node};
/// let node = Node::from_json_str("[1]")?;
/// assert_eq!(classify(&node), Kind::Array);
/// # Ok::<(), contains_core::CanonicalizeError>(())
/// ```
#[must_use]
pub fn classify(node: &Node) -> Kind {
    match node {
        Node::Null => Kind::Null,
        Node::Bool(_) => Kind::Bool,
        Node::Number(_) => Kind::Number,
        Node::String(_) => Kind::String,
        Node::Array(_) => Kind::Array,
        Node::Object(_) => Kind::Object,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_is_classified() {
        let cases = [
            ("null", Kind::Null),
            ("true", Kind::Bool),
            ("1.5", Kind::Number),
            ("\"s\"", Kind::String),
            ("[]", Kind::Array),
            ("{}", Kind::Object),
        ];
        for (json, expected) in cases {
            let node = Node::from_json_str(json).unwrap();
            assert_eq!(classify(&node), expected, "{json}");
        }
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Kind::Object.to_string(), "object");
        assert_eq!(Kind::Bool.to_string(), "boolean");
    }
}

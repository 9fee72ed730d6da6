//! Path lookups into a [`Node`] tree.
//!
//! Index steps into objects and key steps into arrays are resolved through
//! their decimal form, so `list.0` and `list["0"]` address the same node.

use crate::{Node, Path, PathSegment};

/// Returns the node at `path`, or `None` when any step is absent.
///
/// ```
/// # use contains_core::{get, Node, Path};
/// let root = Node::from_json_str(r#"{"list":[{"a":1}]}"#)?;
/// let found = get(&root, &Path::parse("list.0.a")?);
/// assert_eq!(found, Some(&Node::from_json_str("1")?));
/// assert!(get(&root, &Path::parse("list.1")?).is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn get<'a>(root: &'a Node, path: &Path) -> Option<&'a Node> {
    path.segments().iter().try_fold(root, step)
}

/// Indicates whether `path` resolves to a node.
#[must_use]
pub fn has(root: &Node, path: &Path) -> bool {
    get(root, path).is_some()
}

fn step<'a>(node: &'a Node, segment: &PathSegment) -> Option<&'a Node> {
    match (node, segment) {
        (Node::Object(map), PathSegment::Key(key)) => map.get(key),
        (Node::Object(map), PathSegment::Index(index)) => map.get(&index.to_string()),
        (Node::Array(items), PathSegment::Index(index)) => items.get(*index),
        (Node::Array(items), PathSegment::Key(key)) => {
            key.parse::<usize>().ok().and_then(|index| items.get(index))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(json: &str) -> Node {
        Node::from_json_str(json).unwrap()
    }

    #[test]
    fn root_path_resolves_to_root() {
        let root = node("[1,2]");
        assert_eq!(get(&root, &Path::new()), Some(&root));
    }

    #[test]
    fn missing_key_is_absent() {
        let root = node(r#"{"x":1}"#);
        assert!(has(&root, &Path::parse("x").unwrap()));
        assert!(!has(&root, &Path::parse("y").unwrap()));
    }

    #[test]
    fn null_values_are_present() {
        let root = node(r#"{"x":null}"#);
        assert!(has(&root, &Path::parse("x").unwrap()));
    }

    #[test]
    fn numeric_keys_and_indices_interchange() {
        let object = node(r#"{"0":"zero"}"#);
        assert_eq!(get(&object, &Path::parse("0").unwrap()), Some(&node("\"zero\"")));
        let array = node(r#"["zero"]"#);
        assert_eq!(get(&array, &Path::parse("[\"0\"]").unwrap()), Some(&node("\"zero\"")));
    }

    #[test]
    fn scalars_have_no_children() {
        let root = node(r#"{"a":5}"#);
        assert!(!has(&root, &Path::parse("a.b").unwrap()));
        assert!(!has(&root, &Path::parse("a.0").unwrap()));
    }
}

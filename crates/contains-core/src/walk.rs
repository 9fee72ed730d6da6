//! Depth-first pre-order traversal of a [`Node`] tree.
//!
//! The walker keeps an explicit work stack, so arbitrarily deep trees do not
//! grow the native call stack.

use crate::{Kind, Node, Path, PathSegment};

/// Positional metadata handed to the visitor for every node.
#[derive(Clone, Copy, Debug)]
pub struct VisitInfo<'a> {
    /// Location of the node relative to the walked root.
    pub path: &'a Path,
    /// The containing node, `None` for the root.
    pub parent: Option<&'a Node>,
    /// Kind of the containing node, `None` for the root.
    pub parent_kind: Option<Kind>,
    /// Number of steps from the root; the root is at depth 0.
    pub depth: usize,
}

/// Signals a visitor can raise to steer the traversal.
#[derive(Debug, Default)]
pub struct WalkControls {
    skip_children: bool,
    stop: bool,
}

impl WalkControls {
    /// Prevents automatic descent into the current node's children.
    pub fn skip_children(&mut self) {
        self.skip_children = true;
    }

    /// Abandons the remainder of the walk after the current node.
    pub fn stop(&mut self) {
        self.stop = true;
    }
}

/// Outcome of a completed walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Number of nodes handed to the visitor.
    pub visited: usize,
    /// Whether the visitor ended the walk early.
    pub stopped: bool,
}

struct Frame<'t> {
    node: &'t Node,
    path: Path,
    parent: Option<&'t Node>,
    depth: usize,
}

/// Visits `tree` depth-first in pre-order, root included.
///
/// Object members are visited in key order and array elements in index
/// order. An error returned by the visitor aborts the walk.
///
/// ```
/// # use contains_core::{walk, Node};
/// let tree = Node::from_json_str(r#"{"a":[1,2],"b":{"c":3}}"#)?;
/// let mut paths = Vec::new();
/// walk(&tree, |_, info, _| {
///     paths.push(info.path.to_string());
///     Ok::<(), std::convert::Infallible>(())
/// })
/// .unwrap();
/// assert_eq!(paths, ["", "a", "a.0", "a.1", "b", "b.c"]);
/// # Ok::<(), contains_core::CanonicalizeError>(())
/// ```
pub fn walk<'t, F, E>(tree: &'t Node, mut visit: F) -> Result<WalkSummary, E>
where
    F: FnMut(&'t Node, &VisitInfo<'_>, &mut WalkControls) -> Result<(), E>,
{
    let mut summary = WalkSummary::default();
    let mut stack = vec![Frame { node: tree, path: Path::new(), parent: None, depth: 0 }];

    while let Some(frame) = stack.pop() {
        let mut controls = WalkControls::default();
        let info = VisitInfo {
            path: &frame.path,
            parent: frame.parent,
            parent_kind: frame.parent.map(Node::kind),
            depth: frame.depth,
        };
        visit(frame.node, &info, &mut controls)?;
        summary.visited += 1;

        if controls.stop {
            summary.stopped = true;
            break;
        }
        if controls.skip_children {
            continue;
        }

        // Children are pushed in reverse so the first one is popped next.
        match frame.node {
            Node::Array(items) => {
                for (index, child) in items.iter().enumerate().rev() {
                    stack.push(Frame {
                        node: child,
                        path: frame.path.child(PathSegment::Index(index)),
                        parent: Some(frame.node),
                        depth: frame.depth + 1,
                    });
                }
            }
            Node::Object(map) => {
                for (key, child) in map.iter().rev() {
                    stack.push(Frame {
                        node: child,
                        path: frame.path.child(PathSegment::key(key.as_str())),
                        parent: Some(frame.node),
                        depth: frame.depth + 1,
                    });
                }
            }
            _ => {}
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::get;

    fn node(json: &str) -> Node {
        Node::from_json_str(json).unwrap()
    }

    fn visited_paths(tree: &Node, skip_at: Option<&str>) -> Vec<String> {
        let mut paths = Vec::new();
        walk(tree, |_, info, controls| {
            let rendered = info.path.to_string();
            if Some(rendered.as_str()) == skip_at {
                controls.skip_children();
            }
            paths.push(rendered);
            Ok::<(), Infallible>(())
        })
        .unwrap();
        paths
    }

    #[test]
    fn scalar_root_is_visited_once() {
        let summary = walk(&node("7"), |_, info, _| {
            assert!(info.parent.is_none());
            assert_eq!(info.depth, 0);
            Ok::<(), Infallible>(())
        })
        .unwrap();
        assert_eq!(summary, WalkSummary { visited: 1, stopped: false });
    }

    #[test]
    fn skip_children_prunes_only_that_subtree() {
        let tree = node(r#"{"a":{"x":1,"y":2},"b":3}"#);
        assert_eq!(visited_paths(&tree, Some("a")), ["", "a", "b"]);
    }

    #[test]
    fn stop_ends_the_walk() {
        let tree = node("[1,2,3]");
        let mut seen = 0;
        let summary = walk(&tree, |_, info, controls| {
            seen += 1;
            if info.path.to_string() == "1" {
                controls.stop();
            }
            Ok::<(), Infallible>(())
        })
        .unwrap();
        assert_eq!(seen, 3);
        assert!(summary.stopped);
    }

    #[test]
    fn visitor_errors_abort() {
        let tree = node("[1,[2,3]]");
        let err = walk(&tree, |_, info, _| if info.depth == 2 { Err(info.depth) } else { Ok(()) })
            .unwrap_err();
        assert_eq!(err, 2);
    }

    #[test]
    fn parent_metadata_matches_container() {
        let tree = node(r#"{"list":[{"a":1}]}"#);
        walk(&tree, |_, info, _| {
            if info.path.to_string() == "list.0" {
                assert_eq!(info.parent_kind, Some(Kind::Array));
                assert_eq!(info.depth, 2);
            }
            Ok::<(), Infallible>(())
        })
        .unwrap();
    }

    #[test]
    fn every_walked_path_resolves_to_the_visited_node() {
        let tree = node(r#"{"a":[{"b":[1,{"c":null}]},"s"],"0":{"x.y":true}}"#);
        walk(&tree, |visited, info, _| {
            assert_eq!(get(&tree, info.path), Some(visited), "{}", info.path);
            Ok::<(), Infallible>(())
        })
        .unwrap();
    }
}

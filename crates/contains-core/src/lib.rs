//! Structural containment checks for JSON-like documents.
//!
//! `contains-core` answers whether a *needle* document is structurally
//! contained in a *haystack* document: every path of the needle must exist
//! in the haystack, and arrays that hold records are matched without regard
//! to element order. Leaf comparison is left to the caller through a
//! [`Reporter`], or done with strict equality by [`check`].
//!
//! ```
//! use contains_core::{ContainsOptions, MismatchKind, Node};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let haystack = Node::from_json_str(r#"{"users":[{"id":1,"name":"ada"},{"id":2,"name":"bob"}]}"#)?;
//!     let needle = Node::from_json_str(r#"{"users":[{"id":2},{"id":1}]}"#)?;
//!     let report = haystack.check_contains(&needle, &ContainsOptions::default())?;
//!     assert!(report.is_empty());
//!
//!     let needle = Node::from_json_str(r#"{"users":[{"id":1}],"admin":true}"#)?;
//!     let report = haystack.check_contains(&needle, &ContainsOptions::default())?;
//!     assert_eq!(report.mismatches()[0].kind, MismatchKind::MissingPath);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod access;
pub mod contains;
mod error;
mod kind;
mod node;
mod number;
mod options;
mod path;
mod report;
mod walk;

pub use access::{get, has};
pub use contains::{check, contains_structure, contains_with};
pub use error::{CanonicalizeError, ContainsError, OptionsError, PathError};
pub use kind::{classify, Kind};
pub use node::Node;
pub use number::Number;
pub use options::ContainsOptions;
pub use path::{Path, PathSegment};
pub use report::{Callbacks, Collector, Mismatch, MismatchKind, Report, Reporter};
pub use walk::{walk, VisitInfo, WalkControls, WalkSummary};

/// Returns the semantic version of the `contains-core` crate.
///
/// ```
/// assert!(!contains_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

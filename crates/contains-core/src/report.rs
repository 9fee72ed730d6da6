//! Mismatch events and the sinks that receive them.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::{Kind, Node, Path};

/// Category of a containment failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// Haystack and needle roots are of different kinds; nothing below was
    /// compared. Also raised for the two elements of an unordered pair, which
    /// are compared as roots of their own; the path is then the needle
    /// element's.
    RootType,
    /// The haystack has no value at a path present in the needle.
    MissingPath,
    /// A haystack array has fewer elements than the needle array matched against it.
    ArrayTooShort,
    /// The needle holds a composite value where the haystack holds another kind.
    KindMismatch,
    /// Leaf values at the same path are not equal.
    ValueMismatch,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RootType => "root_type",
            Self::MissingPath => "missing_path",
            Self::ArrayTooShort => "array_too_short",
            Self::KindMismatch => "kind_mismatch",
            Self::ValueMismatch => "value_mismatch",
        };
        f.write_str(name)
    }
}

/// A single containment failure, located by its needle-side path.
///
/// `Display` renders a human-readable message; the fields let harnesses
/// assert on the category and location without parsing prose.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Mismatch {
    /// Failure category.
    pub kind: MismatchKind,
    /// Location within the needle (and the corresponding haystack position).
    pub path: Path,
    /// The needle value at `path`.
    #[serde(serialize_with = "serialize_node")]
    pub expected: Node,
    /// The haystack value at `path`, absent for [`MismatchKind::MissingPath`].
    #[serde(serialize_with = "serialize_optional_node", skip_serializing_if = "Option::is_none")]
    pub actual: Option<Node>,
}

impl Mismatch {
    pub(crate) fn root_type(path: Path, actual: &Node, expected: &Node) -> Self {
        Self::located(MismatchKind::RootType, path, actual, expected)
    }

    pub(crate) fn missing_path(path: Path, expected: &Node) -> Self {
        Self { kind: MismatchKind::MissingPath, path, expected: expected.clone(), actual: None }
    }

    pub(crate) fn array_too_short(path: Path, actual: &Node, expected: &Node) -> Self {
        Self::located(MismatchKind::ArrayTooShort, path, actual, expected)
    }

    pub(crate) fn kind_mismatch(path: Path, actual: &Node, expected: &Node) -> Self {
        Self::located(MismatchKind::KindMismatch, path, actual, expected)
    }

    /// Builds a [`MismatchKind::ValueMismatch`] event.
    ///
    /// Exposed for custom [`Reporter`]s that apply their own equality in
    /// [`Reporter::on_match`].
    #[must_use]
    pub fn value_mismatch(path: Path, actual: &Node, expected: &Node) -> Self {
        Self::located(MismatchKind::ValueMismatch, path, actual, expected)
    }

    fn located(kind: MismatchKind, path: Path, actual: &Node, expected: &Node) -> Self {
        Self { kind, path, expected: expected.clone(), actual: Some(actual.clone()) }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected = self.expected.to_json_string();
        let actual = self.actual.as_ref().map(Node::to_json_string).unwrap_or_default();
        let actual_kind = self.actual.as_ref().map_or(Kind::Null, Node::kind);
        match self.kind {
            MismatchKind::RootType if self.path.is_empty() => write!(
                f,
                "the haystack at \"\" is of type {} but the needle is of type {}; haystack: {actual} needle: {expected}",
                actual_kind,
                self.expected.kind(),
            ),
            MismatchKind::RootType => write!(
                f,
                "the haystack element paired with \"{}\" is of type {} but the needle element is of type {}; haystack: {actual} needle: {expected}",
                self.path,
                actual_kind,
                self.expected.kind(),
            ),
            MismatchKind::MissingPath => write!(
                f,
                "the haystack does not have the path \"{}\", expected it to contain {expected}",
                self.path,
            ),
            MismatchKind::ArrayTooShort => write!(
                f,
                "the haystack array at \"{}\" has {} elements, fewer than the {} of the needle array; haystack: {actual} needle: {expected}",
                self.path,
                element_count(self.actual.as_ref()),
                element_count(Some(&self.expected)),
            ),
            MismatchKind::KindMismatch => write!(
                f,
                "expected {} at \"{}\" but the haystack holds {}: {actual}",
                self.expected.kind(),
                self.path,
                actual_kind,
            ),
            MismatchKind::ValueMismatch => write!(
                f,
                "value at \"{}\" differs: expected {expected}, found {actual}",
                self.path,
            ),
        }
    }
}

fn element_count(node: Option<&Node>) -> usize {
    match node {
        Some(Node::Array(items)) => items.len(),
        _ => 0,
    }
}

fn serialize_node<S>(node: &Node, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    node.to_json_value().serialize(serializer)
}

fn serialize_optional_node<S>(node: &Option<Node>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    node.as_ref().map(Node::to_json_value).serialize(serializer)
}

/// Receives the outcomes of a containment check.
pub trait Reporter {
    /// Called for each needle leaf whose path exists in the haystack, and for
    /// containers when `skip_containers` is off.
    ///
    /// The engine only establishes that the path exists; equality of
    /// `actual` and `expected` is for the reporter to judge.
    fn on_match(&mut self, actual: &Node, expected: &Node, path: &Path);

    /// Called for each structural containment failure.
    fn on_mismatch(&mut self, mismatch: Mismatch);

    /// Polled before every visit; returning `true` ends the check early.
    fn should_stop(&self) -> bool {
        false
    }
}

/// Adapts a pair of closures into a [`Reporter`].
pub struct Callbacks<M, X> {
    on_match: M,
    on_mismatch: X,
}

impl<M, X> Callbacks<M, X>
where
    M: FnMut(&Node, &Node, &Path),
    X: FnMut(Mismatch),
{
    /// Wraps the match and mismatch callbacks.
    pub fn new(on_match: M, on_mismatch: X) -> Self {
        Self { on_match, on_mismatch }
    }
}

impl<M, X> Reporter for Callbacks<M, X>
where
    M: FnMut(&Node, &Node, &Path),
    X: FnMut(Mismatch),
{
    fn on_match(&mut self, actual: &Node, expected: &Node, path: &Path) {
        (self.on_match)(actual, expected, path);
    }

    fn on_mismatch(&mut self, mismatch: Mismatch) {
        (self.on_mismatch)(mismatch);
    }
}

/// A [`Reporter`] that records every mismatch, treating unequal leaves as
/// [`MismatchKind::ValueMismatch`]. Composite values are never compared
/// as a whole.
///
/// ```
/// # use contains_core::{contains_with, Collector, ContainsOptions, MismatchKind, Node};
/// let haystack = Node::from_json_str(r#"{"a":1,"b":2}"#)?;
/// let needle = Node::from_json_str(r#"{"a":1,"b":3,"c":4}"#)?;
/// let mut collector = Collector::new();
/// contains_with(&haystack, &needle, &mut collector, &ContainsOptions::default())?;
/// let report = collector.into_report();
/// let kinds: Vec<_> = report.iter().map(|m| m.kind).collect();
/// assert_eq!(kinds, [MismatchKind::ValueMismatch, MismatchKind::MissingPath]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Collector {
    mismatches: Vec<Mismatch>,
    limit: Option<usize>,
}

impl Collector {
    /// Creates a collector without a mismatch limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the check once `limit` mismatches have been recorded.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Consumes the collector, returning the recorded mismatches.
    #[must_use]
    pub fn into_report(self) -> Report {
        Report { mismatches: self.mismatches }
    }
}

impl Reporter for Collector {
    fn on_match(&mut self, actual: &Node, expected: &Node, path: &Path) {
        // Containers are only delivered with `skip_containers` off; their
        // contents are judged leaf by leaf.
        if !expected.is_composite() && actual != expected {
            self.mismatches.push(Mismatch::value_mismatch(path.clone(), actual, expected));
        }
    }

    fn on_mismatch(&mut self, mismatch: Mismatch) {
        self.mismatches.push(mismatch);
    }

    fn should_stop(&self) -> bool {
        self.limit.is_some_and(|limit| self.mismatches.len() >= limit)
    }
}

/// Mismatches gathered by a [`Collector`], in discovery order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report {
    mismatches: Vec<Mismatch>,
}

impl Report {
    /// Indicates whether the needle was fully contained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Returns the number of mismatches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mismatches.len()
    }

    /// Returns an iterator over the mismatches.
    pub fn iter(&self) -> std::slice::Iter<'_, Mismatch> {
        self.mismatches.iter()
    }

    /// Returns the mismatches as a slice.
    #[must_use]
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    /// Consumes the report and returns the mismatches.
    #[must_use]
    pub fn into_mismatches(self) -> Vec<Mismatch> {
        self.mismatches
    }

    /// Renders one message per line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();
        for mismatch in &self.mismatches {
            output.push_str(&mismatch.to_string());
            output.push('\n');
        }
        output
    }
}

impl IntoIterator for Report {
    type Item = Mismatch;
    type IntoIter = std::vec::IntoIter<Mismatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.mismatches.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Mismatch;
    type IntoIter = std::slice::Iter<'a, Mismatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.mismatches.iter()
    }
}

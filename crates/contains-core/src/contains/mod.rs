//! Structural containment engine.
//!
//! The engine walks the needle and checks each visited path against the
//! haystack. Arrays holding records are handed to the unordered matcher,
//! which pairs their elements by score and re-enters the engine per pair.

mod assignment;
mod unordered;

use tracing::debug;

use crate::{
    get, walk, Callbacks, Collector, ContainsError, ContainsOptions, Mismatch, Node, Path,
    PathSegment, Report, Reporter, VisitInfo, WalkControls,
};

/// Checks that `needle` is structurally contained in `haystack`.
///
/// `on_match(actual, expected, path)` is called for every needle leaf whose
/// path exists in the haystack; deciding whether the two values are equal is
/// left to the caller. With `skip_containers` on, a leaf whose haystack
/// counterpart is an object or array is passed over. `on_mismatch` receives every structural failure. The
/// check keeps going after a mismatch, so one call surfaces all of them.
///
/// ```
/// # use contains_core::{contains_structure, ContainsOptions, Node};
/// let haystack = Node::from_json_str(r#"[{"a":1,"b":2},{"c":3,"d":4}]"#)?;
/// let needle = Node::from_json_str(r#"[{"c":3,"d":4},{"a":1,"b":2}]"#)?;
/// let mut unequal = 0;
/// let mut mismatches = Vec::new();
/// contains_structure(
///     &haystack,
///     &needle,
///     |actual, expected, _path| if actual != expected { unequal += 1 },
///     |mismatch| mismatches.push(mismatch),
///     &ContainsOptions::default(),
/// )?;
/// assert_eq!(unequal, 0);
/// assert!(mismatches.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn contains_structure<M, X>(
    haystack: &Node,
    needle: &Node,
    on_match: M,
    on_mismatch: X,
    options: &ContainsOptions,
) -> Result<(), ContainsError>
where
    M: FnMut(&Node, &Node, &Path),
    X: FnMut(Mismatch),
{
    let mut reporter = Callbacks::new(on_match, on_mismatch);
    contains_with(haystack, needle, &mut reporter, options)
}

/// Same as [`contains_structure`], delivering outcomes to a [`Reporter`].
pub fn contains_with<R>(
    haystack: &Node,
    needle: &Node,
    reporter: &mut R,
    options: &ContainsOptions,
) -> Result<(), ContainsError>
where
    R: Reporter + ?Sized,
{
    options.validate()?;
    let mut engine = Engine { reporter, options };
    engine.check(haystack, needle, &Path::new(), 0)
}

/// Runs a containment check with strict leaf equality and returns every
/// mismatch found.
///
/// ```
/// # use contains_core::{check, ContainsOptions, MismatchKind, Node};
/// let haystack = Node::from_json_str(r#"{"x":1}"#)?;
/// let needle = Node::from_json_str(r#"{"x":1,"y":2}"#)?;
/// let report = check(&haystack, &needle, &ContainsOptions::default())?;
/// assert_eq!(report.len(), 1);
/// assert_eq!(report.mismatches()[0].kind, MismatchKind::MissingPath);
/// assert_eq!(report.mismatches()[0].path.to_string(), "y");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn check(
    haystack: &Node,
    needle: &Node,
    options: &ContainsOptions,
) -> Result<Report, ContainsError> {
    let mut collector = Collector::new();
    contains_with(haystack, needle, &mut collector, options)?;
    Ok(collector.into_report())
}

struct Engine<'r, R: ?Sized> {
    reporter: &'r mut R,
    options: &'r ContainsOptions,
}

impl<R> Engine<'_, R>
where
    R: Reporter + ?Sized,
{
    // `base` is the absolute needle path of `needle`, `base_depth` its depth.
    fn check(
        &mut self,
        haystack: &Node,
        needle: &Node,
        base: &Path,
        base_depth: usize,
    ) -> Result<(), ContainsError> {
        let (actual_kind, expected_kind) = (haystack.kind(), needle.kind());
        if actual_kind != expected_kind {
            debug!(path = %base, haystack = %actual_kind, needle = %expected_kind, "root kind mismatch");
            self.reporter.on_mismatch(Mismatch::root_type(base.clone(), haystack, needle));
            return Ok(());
        }

        walk(needle, |expected, info, controls| {
            self.visit(haystack, expected, info, controls, base, base_depth)
        })?;
        Ok(())
    }

    fn visit(
        &mut self,
        haystack: &Node,
        expected: &Node,
        info: &VisitInfo<'_>,
        controls: &mut WalkControls,
        base: &Path,
        base_depth: usize,
    ) -> Result<(), ContainsError> {
        if self.reporter.should_stop() {
            controls.stop();
            return Ok(());
        }

        let depth = base_depth + info.depth;
        let path = base.join(info.path);
        if depth > self.options.max_depth() {
            return Err(ContainsError::DepthLimitExceeded { path, limit: self.options.max_depth() });
        }

        let Some(actual) = get(haystack, info.path) else {
            self.reporter.on_mismatch(Mismatch::missing_path(path, expected));
            controls.skip_children();
            return Ok(());
        };

        match expected {
            Node::Array(items) if !self.options.array_strict_comparison() && is_unordered(items) => {
                controls.skip_children();
                self.match_unordered(actual, expected, items, &path, depth)
            }
            Node::Array(_) | Node::Object(_) => {
                if actual.kind() != expected.kind() {
                    self.reporter.on_mismatch(Mismatch::kind_mismatch(path, actual, expected));
                    controls.skip_children();
                } else if !self.options.skip_containers() {
                    self.reporter.on_match(actual, expected, &path);
                }
                Ok(())
            }
            // A leaf facing a container is only reported when containers
            // are not skipped.
            _ if self.options.skip_containers() && actual.is_composite() => Ok(()),
            _ => {
                self.reporter.on_match(actual, expected, &path);
                Ok(())
            }
        }
    }

    fn match_unordered(
        &mut self,
        actual: &Node,
        expected: &Node,
        needle_items: &[Node],
        path: &Path,
        depth: usize,
    ) -> Result<(), ContainsError> {
        let Node::Array(haystack_items) = actual else {
            self.reporter.on_mismatch(Mismatch::kind_mismatch(path.clone(), actual, expected));
            return Ok(());
        };
        if haystack_items.len() < needle_items.len() {
            debug!(%path, haystack = haystack_items.len(), needle = needle_items.len(), "haystack array too short");
            self.reporter.on_mismatch(Mismatch::array_too_short(path.clone(), actual, expected));
            return Ok(());
        }

        let pairing = unordered::best_pairing(needle_items, haystack_items, self.options.permutation_limit());
        debug!(%path, score = pairing.score(), "paired unordered array");
        for (needle_index, haystack_index) in pairing.pairs() {
            if self.reporter.should_stop() {
                break;
            }
            self.check(
                &haystack_items[haystack_index],
                &needle_items[needle_index],
                &path.child(PathSegment::Index(needle_index)),
                depth + 1,
            )?;
        }
        Ok(())
    }
}

// Arrays of more than one element that hold at least one record are matched
// without regard to order.
fn is_unordered(items: &[Node]) -> bool {
    items.len() > 1 && items.iter().any(|item| matches!(item, Node::Object(_)))
}

//! Pairing of needle array elements with haystack array elements when order
//! does not matter.
//!
//! Every needle position is paired with a distinct haystack index. Candidate
//! assignments are enumerated in lexicographic order (identity first) and
//! scored; the first candidate with the highest score wins. When the number
//! of candidates exceeds the configured limit, a maximum-weight assignment is
//! solved instead, which reaches the same optimal score. Among equally scored
//! pairings the solver's choice need not be the first one in enumeration
//! order, so ties can resolve differently above the limit.

use tracing::{debug, trace};

use super::assignment::max_weight_assignment;
use crate::Node;

const SHARED_KEY_POINTS: u64 = 1;
const EQUAL_VALUE_POINTS: u64 = 4;

/// A chosen assignment of needle positions to haystack indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Pairing {
    /// `targets[needle_position]` is the paired haystack index.
    targets: Vec<usize>,
    score: u64,
}

impl Pairing {
    pub(crate) fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets.iter().copied().enumerate()
    }

    pub(crate) fn score(&self) -> u64 {
        self.score
    }
}

/// Scores how well a haystack element matches a needle element.
///
/// Two records earn one point per shared key and four more when the values
/// under that key are equal. Any other pair earns the full five points when
/// the elements are equal and nothing otherwise.
pub(crate) fn pair_score(expected: &Node, actual: &Node) -> u64 {
    match (expected, actual) {
        (Node::Object(expected), Node::Object(actual)) => expected
            .iter()
            .filter_map(|(key, value)| actual.get(key).map(|other| (value, other)))
            .map(|(value, other)| {
                if value == other {
                    SHARED_KEY_POINTS + EQUAL_VALUE_POINTS
                } else {
                    SHARED_KEY_POINTS
                }
            })
            .sum(),
        _ if expected == actual => SHARED_KEY_POINTS + EQUAL_VALUE_POINTS,
        _ => 0,
    }
}

/// Selects the best pairing of `needle` onto `haystack`.
///
/// Callers guarantee `haystack.len() >= needle.len()`.
pub(crate) fn best_pairing(needle: &[Node], haystack: &[Node], permutation_limit: usize) -> Pairing {
    let weights: Vec<Vec<u64>> = needle
        .iter()
        .map(|expected| haystack.iter().map(|actual| pair_score(expected, actual)).collect())
        .collect();

    match candidate_count(needle.len(), haystack.len(), permutation_limit) {
        Some(count) => {
            trace!(count, needle = needle.len(), haystack = haystack.len(), "enumerating candidates");
            enumerate_best(&weights, haystack.len())
        }
        None => {
            debug!(
                needle = needle.len(),
                haystack = haystack.len(),
                permutation_limit,
                "candidate space exceeds limit, solving assignment"
            );
            let targets = max_weight_assignment(&weights);
            let score = total(&weights, &targets);
            Pairing { targets, score }
        }
    }
}

// Number of injective assignments, or `None` once it passes `limit`.
fn candidate_count(needle_len: usize, haystack_len: usize, limit: usize) -> Option<usize> {
    let mut count = 1usize;
    for taken in 0..needle_len {
        count = count.checked_mul(haystack_len - taken)?;
        if count > limit {
            return None;
        }
    }
    Some(count)
}

fn total(weights: &[Vec<u64>], targets: &[usize]) -> u64 {
    targets.iter().enumerate().map(|(row, &column)| weights[row][column]).sum()
}

struct Search<'w> {
    weights: &'w [Vec<u64>],
    // best_remaining[i] bounds the score obtainable from rows i.. onwards.
    best_remaining: Vec<u64>,
    used: Vec<bool>,
    current: Vec<usize>,
    best: Option<Pairing>,
}

fn enumerate_best(weights: &[Vec<u64>], columns: usize) -> Pairing {
    let mut best_remaining = vec![0u64; weights.len() + 1];
    for row in (0..weights.len()).rev() {
        let row_max = weights[row].iter().copied().max().unwrap_or(0);
        best_remaining[row] = best_remaining[row + 1] + row_max;
    }

    let mut search = Search {
        weights,
        best_remaining,
        used: vec![false; columns],
        current: Vec::with_capacity(weights.len()),
        best: None,
    };
    search.descend(0);
    search.best.unwrap_or(Pairing { targets: Vec::new(), score: 0 })
}

impl Search<'_> {
    fn descend(&mut self, score: u64) {
        let row = self.current.len();
        if let Some(best) = &self.best {
            // Equal scores never replace an earlier candidate, so a branch
            // that can at best tie is not worth exploring.
            if score + self.best_remaining[row] <= best.score {
                return;
            }
        }
        if row == self.weights.len() {
            trace!(score, targets = ?self.current, "new best candidate");
            self.best = Some(Pairing { targets: self.current.clone(), score });
            return;
        }
        for column in 0..self.used.len() {
            if self.used[column] {
                continue;
            }
            self.used[column] = true;
            self.current.push(column);
            self.descend(score + self.weights[row][column]);
            self.current.pop();
            self.used[column] = false;
        }
    }
}

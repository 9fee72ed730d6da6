use thiserror::Error;

use crate::Path;

/// Errors that can occur while canonicalizing external data into [`Node`](crate::Node).
#[derive(Debug, Error)]
pub enum CanonicalizeError {
    /// The provided JSON input was invalid.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The provided YAML input was invalid.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The input contained nothing but whitespace.
    #[error("document is empty")]
    EmptyDocument,
    /// Encountered a number that cannot be represented as an IEEE-754 f64.
    #[error("number {value} cannot be represented as f64")]
    NumberOutOfRange {
        /// The textual representation of the offending number.
        value: String,
    },
    /// YAML maps may only contain string keys.
    #[error("unsupported YAML key type: {found}")]
    NonStringYamlKey {
        /// A description of the key that triggered the error.
        found: String,
    },
    /// YAML tags have no counterpart in the JSON data model.
    #[error("unsupported YAML tag: {tag}")]
    UnsupportedYamlTag {
        /// The tag identifier encountered in the document.
        tag: String,
    },
    /// Attempted to construct a [`Number`](crate::Number) that is not finite.
    #[error("non-finite number encountered: {value}")]
    NotFinite {
        /// The offending numeric value.
        value: f64,
    },
}

/// Errors emitted when constructing [`ContainsOptions`](crate::ContainsOptions).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// The depth limit must allow at least the root node.
    #[error("max_depth must be at least 1")]
    ZeroMaxDepth,
    /// The permutation limit must allow at least one candidate.
    #[error("permutation_limit must be at least 1")]
    ZeroPermutationLimit,
    /// The options document could not be decoded.
    #[error("invalid options JSON: {0}")]
    Json(String),
}

/// Errors raised while parsing a dotted or bracketed path string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// A segment between two dots was empty.
    #[error("empty path segment at byte {position}")]
    EmptySegment {
        /// Byte offset of the offending segment.
        position: usize,
    },
    /// A bracket was opened but never closed.
    #[error("unterminated bracket starting at byte {position}")]
    UnterminatedBracket {
        /// Byte offset of the opening bracket.
        position: usize,
    },
    /// Bracket contents were neither an index nor a quoted key.
    #[error("invalid bracket segment {content:?}")]
    InvalidBracket {
        /// The raw text between the brackets.
        content: String,
    },
    /// A closing bracket or quote was followed by something other than `.` or `[`.
    #[error("unexpected character {found:?} at byte {position}")]
    UnexpectedCharacter {
        /// The character that was found.
        found: char,
        /// Byte offset of the character.
        position: usize,
    },
}

/// Hard failures of a containment check.
///
/// Data mismatches are never errors; they are delivered to the reporter.
/// These variants signal that the check itself could not be carried out.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainsError {
    /// The supplied options were inconsistent.
    #[error(transparent)]
    Options(#[from] OptionsError),
    /// The needle nests deeper than the configured limit.
    #[error("needle depth exceeds the limit of {limit} at \"{path}\"")]
    DepthLimitExceeded {
        /// Location of the first node beyond the limit.
        path: Path,
        /// The configured `max_depth`.
        limit: usize,
    },
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PathError;

/// A single step within a [`Path`]: an object key or an array index.
///
/// ```
/// # use contains_core::PathSegment;
/// let key = PathSegment::key("name");
/// let index = PathSegment::index(2);
/// assert!(matches!(key, PathSegment::Key(_)));
/// assert!(matches!(index, PathSegment::Index(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Object key lookup.
    Key(String),
    /// Array index lookup.
    Index(usize),
}

impl PathSegment {
    /// Creates a key segment.
    #[must_use]
    pub fn key<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Self::Key(value.into())
    }

    /// Creates an index segment.
    #[must_use]
    pub fn index(value: usize) -> Self {
        Self::Index(value)
    }

    // Keys that would be misread by the dotted syntax are rendered as `["..."]`.
    fn needs_quoting(key: &str) -> bool {
        key.is_empty()
            || key.contains(['.', '[', ']'])
            || canonical_index(key).is_some()
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) if Self::needs_quoting(key) => {
                let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
                write!(f, "[{quoted}]")
            }
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl Serialize for PathSegment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Key(key) => serializer.serialize_str(key),
            Self::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

impl<'de> Deserialize<'de> for PathSegment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = PathSegment;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string key or non-negative integer index")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(PathSegment::Key(v.to_owned()))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(PathSegment::Key(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                let value = usize::try_from(v).map_err(|_| E::custom("negative index"))?;
                Ok(PathSegment::Index(value))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                let value = usize::try_from(v).map_err(|_| E::custom("index exceeds usize"))?;
                Ok(PathSegment::Index(value))
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

/// Location of a node within a value tree.
///
/// Paths render in dotted form (`list.0.name`), with keys that would be
/// ambiguous in that form wrapped as `["a.b"]`. The root renders as the
/// empty string.
///
/// ```
/// # use contains_core::{Path, PathSegment};
/// let path = Path::new().with_segment(PathSegment::key("list"))
///     .with_segment(PathSegment::index(0));
/// assert_eq!(path.to_string(), "list.0");
/// assert_eq!("list[0]".parse::<Path>()?, path);
/// # Ok::<(), contains_core::PathError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// Creates an empty path pointing at the root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a dotted or bracketed path string.
    ///
    /// Bare numeric segments and `[n]` become indices; `["..."]` is always a
    /// key. The empty string is the root.
    ///
    /// ```
    /// # use contains_core::{Path, PathSegment};
    /// let path = Path::parse(r#"a["b.c"][2].d"#)?;
    /// assert_eq!(path.segments(), &[
    ///     PathSegment::key("a"),
    ///     PathSegment::key("b.c"),
    ///     PathSegment::index(2),
    ///     PathSegment::key("d"),
    /// ]);
    /// # Ok::<(), contains_core::PathError>(())
    /// ```
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let mut segments = Vec::new();
        if input.is_empty() {
            return Ok(Self(segments));
        }
        let bytes = input.as_bytes();
        let mut pos = 0;
        loop {
            if bytes.get(pos) == Some(&b'[') {
                let (segment, next) = parse_bracket(input, pos)?;
                segments.push(segment);
                pos = next;
            } else {
                let end = input[pos..].find(['.', '[']).map_or(input.len(), |offset| pos + offset);
                let raw = &input[pos..end];
                if raw.is_empty() {
                    return Err(PathError::EmptySegment { position: pos });
                }
                segments.push(bare_segment(raw));
                pos = end;
            }

            match input[pos..].chars().next() {
                None => break,
                Some('.') => pos += 1,
                Some('[') => {}
                Some(found) => return Err(PathError::UnexpectedCharacter { found, position: pos }),
            }
        }
        Ok(Self(segments))
    }

    /// Appends a new segment, returning the extended path.
    #[must_use]
    pub fn with_segment(mut self, segment: PathSegment) -> Self {
        self.0.push(segment);
        self
    }

    /// Returns a copy of this path extended by one segment.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        self.clone().with_segment(segment)
    }

    /// Returns a new path with `suffix` appended.
    ///
    /// ```
    /// # use contains_core::Path;
    /// let base = Path::parse("list.1")?;
    /// assert_eq!(base.join(&Path::parse("name")?).to_string(), "list.1.name");
    /// # Ok::<(), contains_core::PathError>(())
    /// ```
    #[must_use]
    pub fn join(&self, suffix: &Path) -> Self {
        let mut segments = Vec::with_capacity(self.len() + suffix.len());
        segments.extend_from_slice(&self.0);
        segments.extend_from_slice(&suffix.0);
        Self(segments)
    }

    /// Returns the underlying segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether the path is the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the final segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// Returns a new path with the last segment removed, if any.
    ///
    /// ```
    /// # use contains_core::{Path, PathSegment};
    /// let path = Path::new().with_segment(PathSegment::index(1));
    /// assert!(path.parent().is_empty());
    /// ```
    #[must_use]
    pub fn parent(&self) -> Self {
        let mut segments = self.0.clone();
        segments.pop();
        Self(segments)
    }

    /// Pushes a new segment in-place.
    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    /// Pops the last segment off the path.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }
}

fn canonical_index(raw: &str) -> Option<usize> {
    let digits = !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit());
    if !digits || (raw.len() > 1 && raw.starts_with('0')) {
        return None;
    }
    raw.parse().ok()
}

fn bare_segment(raw: &str) -> PathSegment {
    match canonical_index(raw) {
        Some(index) => PathSegment::Index(index),
        None => PathSegment::Key(raw.to_owned()),
    }
}

// Parses `[n]` or `["key"]` starting at the opening bracket; returns the
// segment and the byte offset just past the closing bracket.
fn parse_bracket(input: &str, start: usize) -> Result<(PathSegment, usize), PathError> {
    let body = &input[start + 1..];
    if body.starts_with('"') {
        let mut escaped = false;
        let mut quote_end = None;
        for (offset, ch) in body.char_indices().skip(1) {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    quote_end = Some(offset);
                    break;
                }
                _ => {}
            }
        }
        let Some(quote_end) = quote_end else {
            return Err(PathError::UnterminatedBracket { position: start });
        };
        let literal = &body[..=quote_end];
        if body[quote_end + 1..].chars().next() != Some(']') {
            return Err(PathError::UnterminatedBracket { position: start });
        }
        let key: String = serde_json::from_str(literal)
            .map_err(|_| PathError::InvalidBracket { content: literal.to_owned() })?;
        return Ok((PathSegment::Key(key), start + 1 + quote_end + 2));
    }

    let Some(close) = body.find(']') else {
        return Err(PathError::UnterminatedBracket { position: start });
    };
    let content = &body[..close];
    let index = content
        .trim()
        .parse::<usize>()
        .map_err(|_| PathError::InvalidBracket { content: content.to_owned() })?;
    Ok((PathSegment::Index(index), start + 1 + close + 1))
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(value: Vec<PathSegment>) -> Self {
        Self(value)
    }
}

impl From<PathSegment> for Path {
    fn from(value: PathSegment) -> Self {
        Self(vec![value])
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.0.iter().enumerate() {
            let quoted = matches!(segment, PathSegment::Key(key) if PathSegment::needs_quoting(key));
            if idx > 0 && !quoted {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Path {
    type Item = PathSegment;
    type IntoIter = std::vec::IntoIter<PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

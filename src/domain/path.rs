//! Separator-delimited lookup paths
//!
//! A path addresses a node inside a localization tree, e.g. `subject.math.name`.
//! The separator is process-wide (`.` by default, `/` as the alternative) and is
//! read every time a path is parsed or rendered.
//!
//! Parsing collapses doubled separators and drops leading/trailing ones, so
//! `a..b` and `.a.b.` both denote the two segments `a` and `b`. The empty string
//! is the identity path: it resolves to the node it is applied to.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::domain::error::{DomainError, DomainResult};

/// Separators a path may be configured with.
pub const ALLOWED_SEPARATORS: [char; 2] = ['.', '/'];

/// Separator used until [`set_separator`] is called.
pub const DEFAULT_SEPARATOR: char = '.';

static SEPARATOR: AtomicU8 = AtomicU8::new(DEFAULT_SEPARATOR as u8);

/// Current process-wide separator.
pub fn separator() -> char {
    SEPARATOR.load(Ordering::Relaxed) as char
}

/// Change the process-wide separator.
///
/// Paths keep their segments, not their text, so existing values render with
/// the new separator afterwards.
pub fn set_separator(separator: char) -> DomainResult<()> {
    if !ALLOWED_SEPARATORS.contains(&separator) {
        return Err(DomainError::InvalidSeparator(separator.to_string()));
    }
    SEPARATOR.store(separator as u8, Ordering::Relaxed);
    Ok(())
}

fn is_forbidden(c: char) -> bool {
    c.is_whitespace() || c == '"' || c == '\\'
}

/// A validated lookup path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LocalizationPath {
    segments: Vec<String>,
}

impl LocalizationPath {
    /// Parse and validate a path string.
    pub fn new(path: &str) -> DomainResult<Self> {
        if !Self::is_valid(path) {
            return Err(DomainError::InvalidPath(path.to_string()));
        }
        let segments = path
            .split(separator())
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self { segments })
    }

    /// The identity path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True iff `path` is empty or no segment contains a forbidden character.
    pub fn is_valid(path: &str) -> bool {
        path.split(separator())
            .all(|segment| !segment.chars().any(is_forbidden))
    }

    /// Join parts with the separator and parse the result.
    ///
    /// Empty parts and doubled separators at the joins disappear, so
    /// `combine(["eng", ""])` is `eng` and `combine(["a.", ".b"])` is `a.b`.
    pub fn combine<I, S>(parts: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = parts
            .into_iter()
            .map(|part| part.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(&separator().to_string());
        Self::new(&joined)
    }

    /// Append a single segment.
    ///
    /// The segment must be non-empty, free of forbidden characters and must not
    /// contain the separator.
    pub fn join(&self, segment: &str) -> DomainResult<Self> {
        if segment.is_empty()
            || segment.contains(separator())
            || segment.chars().any(is_forbidden)
        {
            return Err(DomainError::InvalidPath(segment.to_string()));
        }
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Self { segments })
    }

    /// `self` followed by all segments of `tail`.
    pub fn concat(&self, tail: &LocalizationPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(tail.segments.iter().cloned());
        Self { segments }
    }

    /// Remove the first segment, returning it together with the remainder.
    pub fn split_first(self) -> DomainResult<(String, Self)> {
        let mut segments = self.segments;
        if segments.is_empty() {
            return Err(DomainError::CannotOperateOnPath(String::new()));
        }
        let first = segments.remove(0);
        Ok((first, Self { segments }))
    }

    /// Remove the last segment, returning it together with the remainder.
    pub fn split_last(self) -> DomainResult<(String, Self)> {
        let mut segments = self.segments;
        match segments.pop() {
            Some(last) => Ok((last, Self { segments })),
            None => Err(DomainError::CannotOperateOnPath(String::new())),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for LocalizationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(&separator().to_string()))
    }
}

impl FromStr for LocalizationPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for LocalizationPath {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// These tests assume the default separator; tests that switch it live in
// their own integration test binary.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_string_when_parsing_then_yields_identity_path() {
        let path = LocalizationPath::new("").unwrap();
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn given_doubled_separators_when_parsing_then_collapses_them() {
        let path = LocalizationPath::new("a..b...c").unwrap();
        assert_eq!(path.segments(), ["a", "b", "c"]);
        assert_eq!(path.to_string(), "a.b.c");
    }

    #[test]
    fn given_edge_separators_when_parsing_then_drops_them() {
        let path = LocalizationPath::new(".fruit.apple.").unwrap();
        assert_eq!(path.segments(), ["fruit", "apple"]);
    }

    #[test]
    fn given_forbidden_characters_when_validating_then_rejects() {
        for bad in ["a b", "a\"b", "a\\b", "a\nb", "a\rb", "a\tb"] {
            assert!(!LocalizationPath::is_valid(bad), "{bad:?} should be invalid");
            assert_eq!(
                LocalizationPath::new(bad),
                Err(DomainError::InvalidPath(bad.to_string()))
            );
        }
    }

    #[test]
    fn given_path_when_splitting_first_then_returns_head_and_rest() {
        let path = LocalizationPath::new("subject.math.name").unwrap();
        let (head, rest) = path.split_first().unwrap();
        assert_eq!(head, "subject");
        assert_eq!(rest.to_string(), "math.name");
    }

    #[test]
    fn given_path_when_splitting_last_then_returns_tail_and_parent() {
        let path = LocalizationPath::new("subject.math.name").unwrap();
        let (tail, parent) = path.split_last().unwrap();
        assert_eq!(tail, "name");
        assert_eq!(parent.to_string(), "subject.math");
    }

    #[test]
    fn given_empty_path_when_splitting_then_fails() {
        assert!(matches!(
            LocalizationPath::empty().split_first(),
            Err(DomainError::CannotOperateOnPath(_))
        ));
        assert!(matches!(
            LocalizationPath::empty().split_last(),
            Err(DomainError::CannotOperateOnPath(_))
        ));
    }

    #[test]
    fn given_segment_with_separator_when_joining_then_rejects() {
        let base = LocalizationPath::new("fruit").unwrap();
        assert!(base.join("a.b").is_err());
        assert!(base.join("").is_err());
        assert_eq!(base.join("apple").unwrap().to_string(), "fruit.apple");
    }

    #[test]
    fn given_unknown_separator_when_setting_then_fails() {
        assert_eq!(
            set_separator('-'),
            Err(DomainError::InvalidSeparator("-".to_string()))
        );
        assert_eq!(separator(), DEFAULT_SEPARATOR);
    }
}

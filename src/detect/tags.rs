use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Tag substituted when nothing was recognized
pub const GENERIC_TAG: &str = "generic";

/// Deduplicated, sorted set of technology tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `{generic}` set used for unrecognized projects
    pub fn generic() -> Self {
        Self::from_iter([GENERIC_TAG])
    }

    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn contains_any(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.contains(tag))
    }

    pub fn is_generic(&self) -> bool {
        self.0.len() == 1 && self.contains(GENERIC_TAG)
    }

    /// Tags in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.iter().collect::<Vec<_>>().join(", ");
        f.write_str(&joined)
    }
}

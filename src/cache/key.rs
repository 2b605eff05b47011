//! Hierarchical query keys.

use std::fmt;

/// One segment of a [`QueryKey`]: a name or a numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeySegment {
    Name(String),
    Id(u64),
}

impl From<&str> for KeySegment {
    fn from(value: &str) -> Self {
        Self::Name(value.to_owned())
    }
}

impl From<String> for KeySegment {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl From<u64> for KeySegment {
    fn from(value: u64) -> Self {
        Self::Id(value)
    }
}

impl fmt::Display for KeySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name:?}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Ordered path of segments, e.g. `["account","profile"]`.
///
/// Invalidation works on prefixes: `["account"]` covers every key below it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<KeySegment>);

impl QueryKey {
    /// Single-segment key.
    #[must_use]
    pub fn root(segment: impl Into<KeySegment>) -> Self {
        Self(vec![segment.into()])
    }

    /// This key extended by one segment.
    #[must_use]
    pub fn child(&self, segment: impl Into<KeySegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    #[must_use]
    pub fn segments(&self) -> &[KeySegment] {
        &self.0
    }

    /// True when `prefix` matches this key's leading segments (a key is its own prefix).
    #[must_use]
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{segment}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
#[path = "key_test.rs"]
mod tests;

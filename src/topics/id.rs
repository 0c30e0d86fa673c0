// Topic identifiers: a path of single-character codes from the taxonomy root.
//
// "G/S" is Geography/Settlement: depth 2, parent "G". The tree is never
// materialized; parent/child relationships are read off the path itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TopicError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TopicId(Vec<char>);

impl TopicId {
    /// Parse a slash-joined path such as `"A/M"`.
    pub fn parse(path: &str) -> Result<Self, TopicError> {
        let invalid = |reason| TopicError::InvalidTopicId {
            path: path.to_string(),
            reason,
        };

        if path.trim().is_empty() {
            return Err(invalid("path is empty"));
        }

        let mut codes = Vec::new();
        for segment in path.trim().split('/') {
            let mut chars = segment.chars();
            match (chars.next(), chars.next()) {
                (Some(code), None) if !code.is_whitespace() => codes.push(code),
                (None, _) => return Err(invalid("empty segment")),
                _ => return Err(invalid("segments must be a single character")),
            }
        }

        Ok(Self(codes))
    }

    /// Build an ID directly from its codes. Returns `None` for an empty slice.
    pub fn from_codes(codes: &[char]) -> Option<Self> {
        if codes.is_empty() {
            None
        } else {
            Some(Self(codes.to_vec()))
        }
    }

    pub fn codes(&self) -> &[char] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The ID with the last code removed, or `None` for a root-level topic.
    pub fn parent(&self) -> Option<Self> {
        Self::from_codes(&self.0[..self.0.len() - 1])
    }

    /// True if `self` is a strict prefix of `other`.
    pub fn is_ancestor_of(&self, other: &TopicId) -> bool {
        self.depth() < other.depth() && other.0.starts_with(&self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, code) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{code}")?;
        }
        Ok(())
    }
}

impl FromStr for TopicId {
    type Err = TopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TopicId {
    type Error = TopicError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TopicId> for String {
    fn from(id: TopicId) -> Self {
        id.to_string()
    }
}

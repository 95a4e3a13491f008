//! Story identifier value type.

use std::fmt;

/// A format-tagged story identifier, e.g. `ADRIFT-400-<digest>` or
/// `AGT-00001-2A7F0C1D`.
///
/// The identifier is derived from file content alone; uniqueness is a
/// property of the content, not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoryId(String);

impl StoryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

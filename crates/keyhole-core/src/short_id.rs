use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// An opaque short identifier standing in for a long URL.
///
/// Identifiers are printable strings produced by a generator at one of the
/// configured length classes. They carry no internal structure; uniqueness
/// across the record set is the only invariant, and it is enforced at the
/// storage layer rather than here.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ShortId(SmolStr);

impl ShortId {
    /// Creates a `ShortId` from any string-like value.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(SmolStr::new(id))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ShortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ShortId").field(&self.0).finish()
    }
}

impl Display for ShortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShortId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Serialize for ShortId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ShortId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = SmolStr::deserialize(deserializer)?;
        Ok(Self(s))
    }
}

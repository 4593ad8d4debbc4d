use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a conversation thread.
///
/// Identifiers for new threads are generated client-side before any server
/// contact; the backend accepts a client-supplied identifier on first use.
/// Serializes as a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(String);

impl ThreadId {
    /// Wraps an existing identifier string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Generates a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ThreadId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ThreadId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_is_unique() {
        let a = ThreadId::generate();
        let b = ThreadId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn serializes_transparently() {
        let id = ThreadId::new("T1");
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json, serde_json::json!("T1"));

        let parsed: ThreadId = serde_json::from_value(serde_json::json!("T2")).unwrap();
        assert_eq!(parsed, ThreadId::new("T2"));
    }

    #[test]
    fn display_matches_raw() {
        let id = ThreadId::new("abc-123");
        assert_eq!(id.to_string(), "abc-123");
        assert_eq!(id.as_str(), "abc-123");
    }
}

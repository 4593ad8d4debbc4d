use serde::{Deserialize, Serialize};

/// A single message in a conversation thread.
///
/// Matches the items returned by `GET /api/thread/{id}` verbatim; the
/// sequence fetched from the backend is used as the session history without
/// transformation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// The role of the message author.
    pub role: MessageRole,

    /// The textual content of the message.
    pub content: String,
}

/// Role type for a conversation message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User role.
    User,

    /// Assistant role.
    Assistant,
}

impl Message {
    /// Create a new `Message` with the given role and content.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a new user `Message`.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create a new assistant `Message`.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

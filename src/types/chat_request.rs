use serde::{Deserialize, Serialize};

use crate::types::ThreadId;

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The prompt text to send.
    pub message: String,

    /// The thread the prompt belongs to.
    #[serde(rename = "threadId")]
    pub thread_id: ThreadId,
}

impl ChatRequest {
    /// Create a new `ChatRequest`.
    pub fn new(message: impl Into<String>, thread_id: ThreadId) -> Self {
        Self {
            message: message.into(),
            thread_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serialization() {
        let request = ChatRequest::new("Hello", ThreadId::new("T1"));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "message": "Hello",
                "threadId": "T1"
            })
        );
    }
}

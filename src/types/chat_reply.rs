use serde::{Deserialize, Serialize};

/// Response body for `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The complete assistant reply text.
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_reply_deserialization() {
        let json = serde_json::json!({ "reply": "Hi there" });
        let reply: ChatReply = serde_json::from_value(json).unwrap();
        assert_eq!(reply.reply, "Hi there");
    }
}

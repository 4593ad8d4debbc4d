// Public modules
pub mod chat_reply;
pub mod chat_request;
pub mod message;
pub mod thread_id;
pub mod thread_summary;

// Re-exports
pub use chat_reply::ChatReply;
pub use chat_request::ChatRequest;
pub use message::{Message, MessageRole};
pub use thread_id::ThreadId;
pub use thread_summary::ThreadSummary;

// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod observability;
pub mod render;
pub mod reveal;
pub mod types;

// Re-exports
pub use client::{Backend, ChatApi};
pub use client_logger::BackendLogger;
pub use error::{Error, Result};
pub use render::{PlainTextRenderer, Renderer, word_count};
pub use reveal::{DEFAULT_CADENCE, Reveal, RevealFrame, RevealRenderer};
pub use types::*;

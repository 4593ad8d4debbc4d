//! Conversation core for the chat application.
//!
//! This module holds the client-side state machine that turns prompts into
//! persisted exchanges:
//!
//! - [`session`]: the active thread's identity, history, and in-flight state
//! - [`exchange`]: the prompt→reply round trip with atomic pair append
//! - [`registry`]: thread metadata CRUD, search, and recency formatting
//! - [`commands`]: slash command parsing for the REPL
//! - [`config`]: CLI argument parsing and configuration
//! - [`prefs`]: persisted theme preference
//!
//! Views never mutate session or registry state directly; every change goes
//! through the named operations these types expose, which is what keeps the
//! ordering and at-most-once invariants auditable.

mod commands;
mod config;
mod exchange;
mod prefs;
mod registry;
mod session;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use exchange::{ExchangeController, SUBMIT_FAILURE_MESSAGE, SubmitOutcome};
pub use prefs::{Theme, load_theme, save_theme};
pub use registry::{ThreadRegistry, format_recency};
pub use session::ActiveSession;

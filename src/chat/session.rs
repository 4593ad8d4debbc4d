//! Active conversation session state.
//!
//! This module provides the `ActiveSession` struct: the client's view of the
//! currently open thread. It holds the thread identity and the full ordered
//! message history, plus the transient state of the round trip in progress.
//!
//! All mutation funnels through the named operations here and in
//! [`ExchangeController`]/[`ThreadRegistry`]; view code only reads.
//!
//! [`ExchangeController`]: crate::chat::ExchangeController
//! [`ThreadRegistry`]: crate::chat::ThreadRegistry

use crate::error::{Error, Result};
use crate::types::{Message, ThreadId};

/// The currently active thread: identifier, ordered history, and in-flight
/// round-trip state.
///
/// The message sequence is append-only and never reordered. Exchanges are
/// appended only as whole (user, assistant) pairs via [`append_exchange`], so
/// no reader ever observes a lone user message once that call returns.
///
/// [`append_exchange`]: ActiveSession::append_exchange
#[derive(Debug, Clone)]
pub struct ActiveSession {
    thread_id: ThreadId,
    messages: Vec<Message>,
    pending_prompt: String,
    last_reply: Option<String>,
    last_error: Option<String>,
    new_thread: bool,
    in_flight: bool,
}

impl ActiveSession {
    /// Creates a session pointing at a brand-new, empty thread.
    pub fn new() -> Self {
        Self {
            thread_id: ThreadId::generate(),
            messages: Vec::new(),
            pending_prompt: String::new(),
            last_reply: None,
            last_error: None,
            new_thread: true,
            in_flight: false,
        }
    }

    /// Replaces the session with a fresh thread.
    ///
    /// Generates a new identifier, empties the history, raises the
    /// new-thread flag, and clears all transient round-trip state.
    pub fn start_new_thread(&mut self) {
        self.thread_id = ThreadId::generate();
        self.messages.clear();
        self.pending_prompt.clear();
        self.last_reply = None;
        self.last_error = None;
        self.new_thread = true;
        self.in_flight = false;
    }

    /// Replaces the session with an existing thread and its fetched history.
    ///
    /// The previous thread's messages are discarded wholesale, never merged.
    pub fn switch_to(&mut self, thread_id: ThreadId, history: Vec<Message>) {
        self.thread_id = thread_id;
        self.messages = history;
        self.pending_prompt.clear();
        self.last_reply = None;
        self.last_error = None;
        self.new_thread = false;
        self.in_flight = false;
    }

    /// Appends one (user, assistant) exchange to the history.
    ///
    /// An exchange is indivisible: exactly one user message then one
    /// assistant message, in that order. Calling this without both halves
    /// present is a programming error and fails fast.
    ///
    /// # Errors
    ///
    /// Returns a validation error if either side is empty; the session is
    /// left unchanged.
    pub fn append_exchange(&mut self, user_text: &str, assistant_text: &str) -> Result<()> {
        if user_text.trim().is_empty() {
            return Err(Error::validation(
                "an exchange requires a user message",
                Some("user_text".to_string()),
            ));
        }
        if assistant_text.is_empty() {
            return Err(Error::validation(
                "an exchange requires an assistant reply",
                Some("assistant_text".to_string()),
            ));
        }
        self.messages.push(Message::user(user_text));
        self.messages.push(Message::assistant(assistant_text));
        Ok(())
    }

    /// Returns the active thread identifier.
    pub fn thread_id(&self) -> &ThreadId {
        &self.thread_id
    }

    /// Returns the ordered message history.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages in the history.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// True while the thread has never had a prompt submitted.
    pub fn is_new_thread(&self) -> bool {
        self.new_thread
    }

    /// True while a round trip is outstanding.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Returns the prompt preserved from a failed round trip, if any.
    pub fn pending_prompt(&self) -> &str {
        &self.pending_prompt
    }

    /// Returns the most recently received reply, if any.
    pub fn last_reply(&self) -> Option<&str> {
        self.last_reply.as_deref()
    }

    /// Returns the current user-visible error, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Marks the start of a round trip: raises the in-flight flag and clears
    /// any stale error banner.
    pub(crate) fn begin_round_trip(&mut self) {
        self.in_flight = true;
        self.last_error = None;
    }

    /// Lowers the in-flight flag. Must run on every exit path of a round
    /// trip, success or failure.
    pub(crate) fn end_round_trip(&mut self) {
        self.in_flight = false;
    }

    /// Lowers the new-thread flag; a thread is non-empty from the moment its
    /// first prompt is sent, before the reply arrives.
    pub(crate) fn mark_submitted(&mut self) {
        self.new_thread = false;
    }

    pub(crate) fn set_pending_prompt(&mut self, prompt: &str) {
        self.pending_prompt = prompt.to_string();
    }

    pub(crate) fn clear_pending_prompt(&mut self) {
        self.pending_prompt.clear();
    }

    pub(crate) fn set_last_reply(&mut self, reply: &str) {
        self.last_reply = Some(reply.to_string());
    }

    pub(crate) fn set_error(&mut self, message: &str) {
        self.last_error = Some(message.to_string());
    }
}

impl Default for ActiveSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_empty_and_new() {
        let session = ActiveSession::new();
        assert_eq!(session.message_count(), 0);
        assert!(session.is_new_thread());
        assert!(!session.in_flight());
        assert!(session.last_reply().is_none());
        assert!(session.last_error().is_none());
        assert_eq!(session.pending_prompt(), "");
    }

    #[test]
    fn start_new_thread_generates_distinct_identifier() {
        let mut session = ActiveSession::new();
        let first = session.thread_id().clone();
        session.start_new_thread();
        assert_ne!(session.thread_id(), &first);
        assert!(session.is_new_thread());
    }

    #[test]
    fn append_exchange_appends_pair_in_order() {
        let mut session = ActiveSession::new();
        session.append_exchange("Hello", "Hi there").unwrap();

        assert_eq!(session.message_count(), 2);
        assert_eq!(session.messages()[0], Message::user("Hello"));
        assert_eq!(session.messages()[1], Message::assistant("Hi there"));
    }

    #[test]
    fn append_exchange_rejects_missing_halves() {
        let mut session = ActiveSession::new();

        let err = session.append_exchange("", "Hi").unwrap_err();
        assert!(err.is_validation());
        let err = session.append_exchange("   ", "Hi").unwrap_err();
        assert!(err.is_validation());
        let err = session.append_exchange("Hello", "").unwrap_err();
        assert!(err.is_validation());

        assert_eq!(session.message_count(), 0);
    }

    #[test]
    fn switch_to_replaces_history_wholesale() {
        let mut session = ActiveSession::new();
        session.append_exchange("old prompt", "old reply").unwrap();
        session.set_error("stale error");
        session.set_pending_prompt("draft");

        let history = vec![Message::user("a"), Message::assistant("b")];
        session.switch_to(ThreadId::new("T2"), history.clone());

        assert_eq!(session.thread_id(), &ThreadId::new("T2"));
        assert_eq!(session.messages(), history.as_slice());
        assert!(!session.is_new_thread());
        assert!(session.last_error().is_none());
        assert!(session.last_reply().is_none());
        assert_eq!(session.pending_prompt(), "");
    }

    #[test]
    fn round_trip_flag_discipline() {
        let mut session = ActiveSession::new();
        session.set_error("previous failure");

        session.begin_round_trip();
        assert!(session.in_flight());
        assert!(session.last_error().is_none());

        session.end_round_trip();
        assert!(!session.in_flight());
    }
}

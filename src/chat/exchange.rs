//! Prompt→reply round-trip orchestration.
//!
//! `ExchangeController` owns the one rule that makes conversation history
//! trustworthy: a prompt and its reply are persisted together exactly once,
//! or not at all. It is also the sole writer of the session's in-flight
//! flag, which is the de facto mutual-exclusion primitive for submissions
//! and gets lock discipline: raised before the suspend point, lowered on
//! every exit path.

use std::sync::Arc;

use crate::chat::session::ActiveSession;
use crate::client::ChatApi;
use crate::observability;

/// User-visible message surfaced when a round trip fails.
pub const SUBMIT_FAILURE_MESSAGE: &str =
    "Failed to get response. Please check your connection and try again.";

/// Outcome of a [`submit`] call.
///
/// [`submit`]: ExchangeController::submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The round trip completed; the exchange was appended and the pending
    /// prompt cleared.
    Completed {
        /// The reply text, for driving the reveal.
        reply: String,
    },

    /// The prompt was empty or a round trip was already in flight; nothing
    /// was issued and the session is unchanged.
    Rejected,

    /// The round trip failed; the error banner is set and the pending prompt
    /// is preserved for a manual retry.
    Failed,
}

/// Orchestrates single prompt→reply round trips against the backend.
pub struct ExchangeController {
    backend: Arc<dyn ChatApi>,
}

impl ExchangeController {
    /// Creates a controller that submits through the given backend.
    pub fn new(backend: Arc<dyn ChatApi>) -> Self {
        Self { backend }
    }

    /// Submits one prompt for the session's active thread.
    ///
    /// Rejects empty/whitespace prompts and submissions made while another
    /// round trip is outstanding. On success the (user, assistant) pair is
    /// appended atomically and the pending prompt is cleared; on failure the
    /// canonical error message is surfaced and the prompt is kept so the
    /// user can retry. The round trip is never retried automatically.
    pub async fn submit(&self, session: &mut ActiveSession, prompt: &str) -> SubmitOutcome {
        let prompt = prompt.trim();
        if prompt.is_empty() || session.in_flight() {
            observability::EXCHANGES_REJECTED.click();
            return SubmitOutcome::Rejected;
        }

        session.begin_round_trip();
        session.mark_submitted();
        session.set_pending_prompt(prompt);

        let result = self.backend.send_message(prompt, session.thread_id()).await;
        session.end_round_trip();

        match result {
            Ok(reply) => {
                // The empty-reply case appends nothing: an exchange requires
                // both halves, and the guard in append_exchange stays intact
                // because this is the only caller.
                if !reply.is_empty()
                    && let Err(err) = session.append_exchange(prompt, &reply)
                {
                    observability::EXCHANGES_FAILED.click();
                    session.set_error(&err.to_string());
                    return SubmitOutcome::Failed;
                }
                session.set_last_reply(&reply);
                session.clear_pending_prompt();
                observability::EXCHANGES_COMPLETED.click();
                SubmitOutcome::Completed { reply }
            }
            Err(_) => {
                observability::EXCHANGES_FAILED.click();
                session.set_error(SUBMIT_FAILURE_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }
}

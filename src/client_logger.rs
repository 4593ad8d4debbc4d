//! Logging trait for backend operations.
//!
//! This module provides the [`BackendLogger`] trait that allows users to
//! capture and record traffic passing through the [`Backend`] client, as
//! well as errors that the conversation core recovers from silently.
//!
//! [`Backend`]: crate::client::Backend

use crate::error::Error;
use crate::types::{Message, ThreadId, ThreadSummary};

/// A trait for logging backend operations.
///
/// Implement this trait to observe all backend interactions. The registry
/// also routes silently-recovered failures (a stale thread list, an
/// unswitched session) through [`log_recovered_error`], since those never
/// surface to the user any other way.
///
/// [`log_recovered_error`]: BackendLogger::log_recovered_error
///
/// # Example
///
/// ```rust,ignore
/// use colloquy::{BackendLogger, Error, ThreadId};
///
/// struct StderrLogger;
///
/// impl BackendLogger for StderrLogger {
///     fn log_reply(&self, thread_id: &ThreadId, reply: &str) {
///         eprintln!("{thread_id}: {} bytes", reply.len());
///     }
///
///     fn log_recovered_error(&self, operation: &str, error: &Error) {
///         eprintln!("{operation} recovered: {error}");
///     }
/// }
/// ```
pub trait BackendLogger: Send + Sync {
    /// Log a completed chat round trip.
    ///
    /// Called once per successful `POST /api/chat` with the full reply text.
    fn log_reply(&self, thread_id: &ThreadId, reply: &str) {
        _ = thread_id;
        _ = reply;
    }

    /// Log a fetched thread list.
    fn log_thread_list(&self, threads: &[ThreadSummary]) {
        _ = threads;
    }

    /// Log a fetched thread history.
    fn log_history(&self, thread_id: &ThreadId, history: &[Message]) {
        _ = thread_id;
        _ = history;
    }

    /// Log an error that was recovered from without user-visible effect.
    ///
    /// `operation` names the operation that raised the error, e.g.
    /// `"list_threads"` or `"fetch_thread"`.
    fn log_recovered_error(&self, operation: &str, error: &Error) {
        _ = operation;
        _ = error;
    }
}

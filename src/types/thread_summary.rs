use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::ThreadId;

/// Registry metadata for a single conversation thread.
///
/// This is the projection returned by `GET /api/thread`: identity, display
/// title, and last-updated time. The full message history is fetched
/// separately per thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSummary {
    /// Unique thread identifier.
    #[serde(rename = "threadId")]
    pub thread_id: ThreadId,

    /// Human-readable thread title.
    pub title: String,

    /// RFC 3339 datetime string for the last update to the thread.
    #[serde(rename = "updatedAt", with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl ThreadSummary {
    /// Create a new `ThreadSummary`.
    pub fn new(
        thread_id: impl Into<ThreadId>,
        title: impl Into<String>,
        updated_at: OffsetDateTime,
    ) -> Self {
        Self {
            thread_id: thread_id.into(),
            title: title.into(),
            updated_at,
        }
    }
}

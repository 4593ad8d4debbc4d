//! Thread registry: metadata CRUD, search, and recency formatting.
//!
//! The registry mirrors the backend's thread list. It is kept eventually
//! consistent: a wholesale refresh runs on session-boundary events (startup,
//! new thread, thread switch, thread deletion), never per message.

use std::sync::Arc;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, Weekday};

use crate::chat::session::ActiveSession;
use crate::client::ChatApi;
use crate::client_logger::BackendLogger;
use crate::error::Result;
use crate::observability;
use crate::types::{ThreadId, ThreadSummary};

const MONTH_DAY: &[FormatItem<'static>] = format_description!("[month repr:short] [day padding:none]");

/// Local mirror of the backend's thread list, with the CRUD operations that
/// keep it and the active session consistent.
pub struct ThreadRegistry {
    backend: Arc<dyn ChatApi>,
    threads: Vec<ThreadSummary>,
    logger: Option<Arc<dyn BackendLogger>>,
}

impl ThreadRegistry {
    /// Creates an empty registry backed by the given API.
    pub fn new(backend: Arc<dyn ChatApi>) -> Self {
        Self {
            backend,
            threads: Vec::new(),
            logger: None,
        }
    }

    /// Attaches a logger that records silently-recovered failures.
    pub fn with_logger(mut self, logger: Arc<dyn BackendLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Returns the registry entries in backend order.
    pub fn threads(&self) -> &[ThreadSummary] {
        &self.threads
    }

    /// Returns the number of known threads.
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// True when no threads are known.
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Refetches the thread list, replacing the local registry wholesale.
    ///
    /// The last fetch wins; there is no incremental merge. A fetch failure
    /// is recovered silently: the registry keeps its stale contents and the
    /// error goes to the logger only, since a missing sidebar list never
    /// blocks continued chat use.
    pub async fn refresh(&mut self) {
        match self.backend.list_threads().await {
            Ok(threads) => {
                observability::REGISTRY_REFRESHES.click();
                self.threads = threads;
            }
            Err(err) => {
                observability::REGISTRY_REFRESH_ERRORS.click();
                if let Some(logger) = &self.logger {
                    logger.log_recovered_error("list_threads", &err);
                }
            }
        }
    }

    /// Starts a brand-new thread in the session, then refreshes.
    ///
    /// Nothing is persisted server-side until the thread's first exchange
    /// completes; the registry itself stores nothing for the new thread.
    pub async fn create_thread(&mut self, session: &mut ActiveSession) {
        session.start_new_thread();
        self.refresh().await;
    }

    /// Switches the session to an existing thread.
    ///
    /// Fetches the thread's full history and hands it to the session
    /// wholesale, then refreshes. A fetch failure is recovered silently and
    /// the session is left unswitched.
    pub async fn select_thread(&mut self, session: &mut ActiveSession, thread_id: &ThreadId) {
        match self.backend.fetch_thread(thread_id).await {
            Ok(history) => {
                session.switch_to(thread_id.clone(), history);
                self.refresh().await;
            }
            Err(err) => {
                observability::REGISTRY_SELECT_ERRORS.click();
                if let Some(logger) = &self.logger {
                    logger.log_recovered_error("fetch_thread", &err);
                }
            }
        }
    }

    /// Deletes a thread's backing storage.
    ///
    /// Callers must have obtained user confirmation before invoking this.
    /// On success the entry is removed from the local registry immediately
    /// rather than waiting for the next refresh, and deleting the active
    /// thread transitions the session to a fresh empty one so the UI never
    /// points at a nonexistent thread.
    ///
    /// # Errors
    ///
    /// Propagates the backend failure with the registry left unchanged;
    /// callers raise a blocking user-visible alert.
    pub async fn delete_thread(
        &mut self,
        session: &mut ActiveSession,
        thread_id: &ThreadId,
    ) -> Result<()> {
        if let Err(err) = self.backend.delete_thread(thread_id).await {
            observability::REGISTRY_DELETE_ERRORS.click();
            return Err(err);
        }
        observability::REGISTRY_DELETES.click();
        self.threads.retain(|thread| thread.thread_id != *thread_id);
        if session.thread_id() == thread_id {
            self.create_thread(session).await;
        }
        Ok(())
    }

    /// Returns a lazy, restartable view of threads whose title contains
    /// `query`, case-insensitively. An empty query yields the full registry
    /// in unchanged order.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a ThreadSummary> + 'a {
        let needle = query.to_lowercase();
        self.threads
            .iter()
            .filter(move |thread| needle.is_empty() || thread.title.to_lowercase().contains(&needle))
    }
}

/// Classifies a timestamp's age for sidebar display.
///
/// "Today" under 24 hours, "Yesterday" under 48, a short weekday name under
/// 7 days, and a short month/day otherwise. Comparisons are strict, so exact
/// boundaries fall to the next bucket.
pub fn format_recency(timestamp: OffsetDateTime, now: OffsetDateTime) -> String {
    let age = now - timestamp;
    if age < Duration::hours(24) {
        "Today".to_string()
    } else if age < Duration::hours(48) {
        "Yesterday".to_string()
    } else if age < Duration::days(7) {
        short_weekday(timestamp.weekday()).to_string()
    } else {
        timestamp
            .format(MONTH_DAY)
            .unwrap_or_else(|_| timestamp.date().to_string())
    }
}

fn short_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use time::macros::datetime;

    use super::*;
    use crate::error::Error;
    use crate::types::Message;

    /// ChatApi double with scripted responses per operation.
    #[derive(Default)]
    struct ScriptedApi {
        lists: Mutex<VecDeque<Result<Vec<ThreadSummary>>>>,
        histories: Mutex<VecDeque<Result<Vec<Message>>>>,
        deletes: Mutex<VecDeque<Result<()>>>,
    }

    impl ScriptedApi {
        fn push_list(&self, list: Result<Vec<ThreadSummary>>) {
            self.lists.lock().unwrap().push_back(list);
        }

        fn push_history(&self, history: Result<Vec<Message>>) {
            self.histories.lock().unwrap().push_back(history);
        }

        fn push_delete(&self, outcome: Result<()>) {
            self.deletes.lock().unwrap().push_back(outcome);
        }
    }

    #[async_trait::async_trait]
    impl ChatApi for ScriptedApi {
        async fn send_message(&self, _message: &str, _thread_id: &ThreadId) -> Result<String> {
            Err(Error::validation("not scripted", None))
        }

        async fn list_threads(&self) -> Result<Vec<ThreadSummary>> {
            self.lists
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn fetch_thread(&self, _thread_id: &ThreadId) -> Result<Vec<Message>> {
            self.histories
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn delete_thread(&self, _thread_id: &ThreadId) -> Result<()> {
            self.deletes.lock().unwrap().pop_front().unwrap_or(Ok(()))
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        recovered: Mutex<Vec<String>>,
    }

    impl BackendLogger for RecordingLogger {
        fn log_recovered_error(&self, operation: &str, _error: &Error) {
            self.recovered.lock().unwrap().push(operation.to_string());
        }
    }

    fn summary(id: &str, title: &str) -> ThreadSummary {
        ThreadSummary::new(id, title, datetime!(2026-06-01 12:00:00 UTC))
    }

    #[tokio::test]
    async fn refresh_replaces_wholesale() {
        let api = Arc::new(ScriptedApi::default());
        api.push_list(Ok(vec![summary("T1", "first"), summary("T2", "second")]));
        api.push_list(Ok(vec![summary("T3", "third")]));
        let mut registry = ThreadRegistry::new(api);

        registry.refresh().await;
        assert_eq!(registry.len(), 2);

        registry.refresh().await;
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.threads()[0].thread_id, ThreadId::new("T3"));
    }

    #[tokio::test]
    async fn refresh_failure_keeps_stale_registry() {
        let api = Arc::new(ScriptedApi::default());
        api.push_list(Ok(vec![summary("T1", "first")]));
        api.push_list(Err(Error::connection("refused", None)));
        let logger = Arc::new(RecordingLogger::default());
        let mut registry = ThreadRegistry::new(api).with_logger(logger.clone());

        registry.refresh().await;
        registry.refresh().await;

        assert_eq!(registry.len(), 1);
        assert_eq!(
            logger.recovered.lock().unwrap().as_slice(),
            &["list_threads".to_string()]
        );
    }

    #[tokio::test]
    async fn select_thread_switches_session_and_refreshes() {
        let api = Arc::new(ScriptedApi::default());
        api.push_history(Ok(vec![Message::user("a"), Message::assistant("b")]));
        api.push_list(Ok(vec![summary("T2", "picked")]));
        let mut registry = ThreadRegistry::new(api);
        let mut session = ActiveSession::new();

        registry
            .select_thread(&mut session, &ThreadId::new("T2"))
            .await;

        assert_eq!(session.thread_id(), &ThreadId::new("T2"));
        assert_eq!(session.message_count(), 2);
        assert!(!session.is_new_thread());
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn select_thread_failure_leaves_session_unswitched() {
        let api = Arc::new(ScriptedApi::default());
        api.push_history(Err(Error::connection("refused", None)));
        let logger = Arc::new(RecordingLogger::default());
        let mut registry = ThreadRegistry::new(api).with_logger(logger.clone());
        let mut session = ActiveSession::new();
        let original = session.thread_id().clone();

        registry
            .select_thread(&mut session, &ThreadId::new("T9"))
            .await;

        assert_eq!(session.thread_id(), &original);
        assert!(session.is_new_thread());
        assert_eq!(
            logger.recovered.lock().unwrap().as_slice(),
            &["fetch_thread".to_string()]
        );
    }

    #[tokio::test]
    async fn delete_active_thread_starts_fresh_session() {
        let api = Arc::new(ScriptedApi::default());
        api.push_history(Ok(vec![Message::user("a"), Message::assistant("b")]));
        let mut registry = ThreadRegistry::new(api);
        let mut session = ActiveSession::new();

        registry
            .select_thread(&mut session, &ThreadId::new("T2"))
            .await;
        let deleted = session.thread_id().clone();

        registry.delete_thread(&mut session, &deleted).await.unwrap();

        assert_ne!(session.thread_id(), &deleted);
        assert_eq!(session.message_count(), 0);
        assert!(session.is_new_thread());
    }

    #[tokio::test]
    async fn delete_other_thread_leaves_session_untouched() {
        let api = Arc::new(ScriptedApi::default());
        api.push_list(Ok(vec![summary("T2", "doomed"), summary("T3", "kept")]));
        let mut registry = ThreadRegistry::new(api);
        let mut session = ActiveSession::new();
        session.switch_to(ThreadId::new("T3"), vec![Message::user("hi")]);

        registry.refresh().await;
        registry
            .delete_thread(&mut session, &ThreadId::new("T2"))
            .await
            .unwrap();

        assert_eq!(session.thread_id(), &ThreadId::new("T3"));
        assert_eq!(session.message_count(), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.threads()[0].thread_id, ThreadId::new("T3"));
    }

    #[tokio::test]
    async fn delete_failure_leaves_registry_unchanged() {
        let api = Arc::new(ScriptedApi::default());
        api.push_list(Ok(vec![summary("T2", "sticky")]));
        api.push_delete(Err(Error::internal_server("boom")));
        let mut registry = ThreadRegistry::new(api);
        let mut session = ActiveSession::new();

        registry.refresh().await;
        let err = registry
            .delete_thread(&mut session, &ThreadId::new("T2"))
            .await
            .unwrap_err();

        assert!(err.is_server_error());
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn search_filters_case_insensitively() {
        let api = Arc::new(ScriptedApi::default());
        api.push_list(Ok(vec![
            summary("T1", "Rust questions"),
            summary("T2", "Trip planning"),
            summary("T3", "More rust help"),
        ]));
        let mut registry = ThreadRegistry::new(api);
        registry.refresh().await;

        let all: Vec<_> = registry.search("").collect();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].thread_id, ThreadId::new("T1"));

        let rust: Vec<_> = registry.search("RUST").map(|t| t.thread_id.clone()).collect();
        assert_eq!(rust, vec![ThreadId::new("T1"), ThreadId::new("T3")]);

        // Restartable: the same query yields the same set again.
        let again: Vec<_> = registry.search("RUST").map(|t| t.thread_id.clone()).collect();
        assert_eq!(rust, again);

        assert_eq!(registry.search("nope").count(), 0);
    }

    #[test]
    fn recency_buckets() {
        let now = datetime!(2026-06-10 12:00:00 UTC);

        assert_eq!(format_recency(datetime!(2026-06-10 02:00:00 UTC), now), "Today");
        assert_eq!(format_recency(datetime!(2026-06-09 18:00:00 UTC), now), "Yesterday");
        // June 5, 2026 is a Friday.
        assert_eq!(format_recency(datetime!(2026-06-05 12:00:00 UTC), now), "Fri");
        assert_eq!(format_recency(datetime!(2026-05-01 12:00:00 UTC), now), "May 1");
    }

    #[test]
    fn recency_boundaries_fall_to_next_bucket() {
        let now = datetime!(2026-06-10 12:00:00 UTC);

        // Exactly 24h old is no longer "Today".
        assert_eq!(
            format_recency(datetime!(2026-06-09 12:00:00 UTC), now),
            "Yesterday"
        );
        // Exactly 48h old: June 8, 2026 is a Monday.
        assert_eq!(format_recency(datetime!(2026-06-08 12:00:00 UTC), now), "Mon");
        // Exactly 7 days old drops to the short date.
        assert_eq!(format_recency(datetime!(2026-06-03 12:00:00 UTC), now), "Jun 3");
    }
}

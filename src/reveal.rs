//! Time-paced reveal of completed replies.
//!
//! The backend returns each assistant reply as one finished string. To give
//! the illusion of live generation, the reply is re-played to the display one
//! token at a time on a fixed cadence. The reveal is purely cosmetic: the
//! stored message is never altered, and a consumer that asks for the stored
//! value at any point gets the full, untruncated text.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::observability;

/// Default delay between reveal ticks.
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(40);

/// One snapshot of a reveal in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealFrame {
    /// The prefix of the reply currently on display.
    pub text: String,

    /// True once the displayed text equals the stored reply exactly.
    pub complete: bool,
}

impl RevealFrame {
    fn empty(complete: bool) -> Self {
        Self {
            text: String::new(),
            complete,
        }
    }
}

/// A lazy stream of growing prefixes of a completed reply.
///
/// The reply is split on single spaces; each cadence tick yields a prefix one
/// token longer than the last, rejoined with single spaces so the final
/// prefix reconstructs the input exactly. The stream terminates after the
/// full text has been yielded; an empty reply terminates immediately.
pub struct Reveal {
    tokens: Vec<String>,
    shown: usize,
    ticker: Interval,
}

impl Reveal {
    /// Create a reveal of `full_text` that ticks once per `cadence`.
    ///
    /// Must be called from within a tokio runtime. The first token appears
    /// one full cadence after creation, not immediately.
    pub fn new(full_text: &str, cadence: Duration) -> Self {
        let tokens = if full_text.is_empty() {
            Vec::new()
        } else {
            full_text.split(' ').map(String::from).collect()
        };
        let mut ticker = tokio::time::interval_at(Instant::now() + cadence, cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            tokens,
            shown: 0,
            ticker,
        }
    }

    /// True once every token has been yielded.
    pub fn is_complete(&self) -> bool {
        self.shown >= self.tokens.len()
    }
}

impl Stream for Reveal {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        if self.is_complete() {
            return Poll::Ready(None);
        }
        match self.ticker.poll_tick(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(_) => {
                self.shown += 1;
                Poll::Ready(Some(self.tokens[..self.shown].join(" ")))
            }
        }
    }
}

/// Drives at most one [`Reveal`] at a time and publishes its frames.
///
/// `start` cancels whatever cadence is already running before beginning a new
/// one, so consumers never observe a mixture of old and new text. The
/// background task is a scoped resource: it is aborted on restart, on
/// [`cancel`], and on drop, so no tick can fire after its reveal is gone.
///
/// [`cancel`]: RevealRenderer::cancel
pub struct RevealRenderer {
    cadence: Duration,
    frames: watch::Receiver<RevealFrame>,
    task: Option<JoinHandle<()>>,
}

impl RevealRenderer {
    /// Create a renderer with the default cadence.
    pub fn new() -> Self {
        Self::with_cadence(DEFAULT_CADENCE)
    }

    /// Create a renderer with a custom cadence.
    pub fn with_cadence(cadence: Duration) -> Self {
        let (_, frames) = watch::channel(RevealFrame::empty(true));
        Self {
            cadence,
            frames,
            task: None,
        }
    }

    /// Begin revealing `full_text`, cancelling any reveal already active.
    ///
    /// The displayed value resets to empty before the first tick. An empty
    /// reply is complete immediately and spawns no task.
    pub fn start(&mut self, full_text: &str) {
        self.cancel();
        observability::REVEALS_STARTED.click();

        let full = full_text.to_string();
        let (tx, rx) = watch::channel(RevealFrame::empty(full.is_empty()));
        self.frames = rx;
        if full.is_empty() {
            return;
        }

        let mut reveal = Reveal::new(&full, self.cadence);
        self.task = Some(tokio::spawn(async move {
            while let Some(prefix) = reveal.next().await {
                let complete = prefix == full;
                if tx.send(RevealFrame {
                    text: prefix,
                    complete,
                })
                .is_err()
                {
                    return;
                }
            }
        }));
    }

    /// Stop the active cadence immediately without completing the reveal.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            observability::REVEALS_CANCELLED.click();
        }
    }

    /// Returns the current reveal snapshot.
    pub fn frame(&self) -> RevealFrame {
        self.frames.borrow().clone()
    }

    /// Waits until the displayed value changes.
    ///
    /// Returns false once no further frames will arrive (the reveal finished
    /// or was cancelled).
    pub async fn changed(&mut self) -> bool {
        self.frames.changed().await.is_ok()
    }
}

impl Default for RevealRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RevealRenderer {
    fn drop(&mut self) {
        self.cancel();
    }
}

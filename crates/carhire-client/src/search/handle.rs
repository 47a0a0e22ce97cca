//! Handle to a running search

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use carhire_core::SearchResults;
use futures::stream::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::events::SearchEvent;
use crate::error::{CarHireError, Result};

/// Sending side of a search's event channel
///
/// Once the search is cancelled nothing more is sent.
pub(crate) struct EventSender {
    tx: mpsc::UnboundedSender<SearchEvent>,
    cancelled: Arc<AtomicBool>,
}

impl EventSender {
    /// Deliver an event, returning `false` when nobody will see it
    pub(crate) fn emit(&self, event: SearchEvent) -> bool {
        if self.cancelled.load(Ordering::SeqCst) {
            return false;
        }
        self.tx.send(event).is_ok()
    }
}

/// A running search
///
/// Implements `Stream<Item = SearchEvent>`.
///
/// # Lifecycle
///
/// - Created via [`SearchOrchestrator::start`](super::SearchOrchestrator::start)
/// - Events are consumed via `next()`, the `Stream` trait or `finish()`
/// - Call `cancel()` to stop the search, or let it drop
///
/// # Example
///
/// ```ignore
/// let mut search = client.search().start(search);
///
/// while let Some(event) = search.next().await {
///     println!("{:?}", event);
/// }
/// ```
pub struct SearchHandle {
    events: mpsc::UnboundedReceiver<SearchEvent>,
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl fmt::Debug for SearchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchHandle")
            .field("cancelled", &self.is_cancelled())
            .field("finished", &self.task.is_finished())
            .finish_non_exhaustive()
    }
}

impl SearchHandle {
    /// Spawn `run` with the sending side of a new event channel
    pub(crate) fn spawn<F, Fut>(run: F) -> Self
    where
        F: FnOnce(EventSender) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, events) = mpsc::unbounded_channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let sender = EventSender {
            tx,
            cancelled: cancelled.clone(),
        };
        let task = tokio::spawn(run(sender));
        Self {
            events,
            cancelled,
            task,
        }
    }

    /// Get the next event
    ///
    /// Returns `None` after the terminal event or once cancelled.
    pub async fn next(&mut self) -> Option<SearchEvent> {
        <Self as StreamExt>::next(self).await
    }

    /// Stop the search
    ///
    /// Outstanding requests are dropped and no further events are
    /// delivered, including any already queued.
    pub fn cancel(&mut self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            debug!("Cancelling search");
            self.task.abort();
            self.events.close();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Wait for the search to end, ignoring per-supplier events
    pub async fn finish(mut self) -> Result<SearchResults> {
        while let Some(event) = self.next().await {
            match event {
                SearchEvent::Finished(results) => return Ok(results),
                SearchEvent::Failed(error) => return Err(error),
                _ => {}
            }
        }
        Err(CarHireError::Cancelled)
    }
}

impl Stream for SearchHandle {
    type Item = SearchEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.cancelled.load(Ordering::SeqCst) {
            return Poll::Ready(None);
        }
        self.events.poll_recv(cx)
    }
}

impl Drop for SearchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

//! Debounced query coordination.
//!
//! Collapses a burst of keystroke events into a single delayed dispatch.
//! The debouncer prevents redundant requests from being issued at all; a
//! request already in flight cannot be aborted and is instead
//! sequence-guarded by the collection store when its response arrives.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Normalizes raw search input.
///
/// A missing or all-whitespace value collapses to the empty string, so
/// clearing a search box is equivalent to searching for nothing rather
/// than doing nothing. Surrounding whitespace is trimmed.
pub fn normalize_keyword(raw: Option<&str>) -> String {
    match raw {
        Some(value) => value.trim().to_string(),
        None => String::new(),
    }
}

/// Collapses rapid submissions into one delayed dispatch.
///
/// Each [`submit`](Self::submit) cancels any pending dispatch and
/// reschedules the action after the quiescence window. At most one dispatch
/// happens per window and the final submission always wins.
///
/// Must be used from within a tokio runtime; the pending dispatch is a
/// spawned timer task.
pub struct QueryDebouncer<F, Fut>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    delay: Duration,
    action: Arc<F>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<F, Fut> QueryDebouncer<F, Fut>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    /// Creates a debouncer dispatching to `action` after `delay` of
    /// quiescence.
    pub fn new(delay: Duration, action: F) -> Self {
        Self {
            delay,
            action: Arc::new(action),
            pending: Mutex::new(None),
        }
    }

    /// Submits raw search input, rescheduling the pending dispatch.
    pub fn submit(&self, raw: Option<&str>) {
        let keyword = normalize_keyword(raw);
        let action = Arc::clone(&self.action);
        let delay = self.delay;

        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action(keyword).await;
        }));
    }

    /// Dispatches immediately, cancelling any pending timer.
    ///
    /// The enter-key path: the operator should not have to wait out the
    /// quiescence window after explicitly requesting the search.
    pub async fn flush(&self, raw: Option<&str>) {
        let keyword = normalize_keyword(raw);
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
        (self.action)(keyword).await;
    }

    /// Returns true while a dispatch is scheduled.
    pub fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

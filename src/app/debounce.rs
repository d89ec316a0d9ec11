//! Debounced event gate.
//!
//! Wraps an action so that a burst of calls collapses into one: every call
//! cancels the pending one and re-arms a timer, and the action runs with the
//! last call's argument once the quiet period passes without another call.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Action wrapped by [`debounce`].  Must be called from within a tokio runtime.
pub struct Debounced<A> {
    action: Arc<dyn Fn(A) + Send + Sync>,
    quiet: Duration,
    pending: Option<JoinHandle<()>>,
}

/// Wrap `action` so it only runs after `quiet` has passed with no new call.
pub fn debounce<A, F>(action: F, quiet: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced {
        action: Arc::new(action),
        quiet,
        pending: None,
    }
}

impl<A: Send + 'static> Debounced<A> {
    /// Supersede any pending run and schedule `action(arg)`.
    pub fn call(&mut self, arg: A) {
        self.cancel();
        let action = Arc::clone(&self.action);
        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            action(arg);
        }));
    }

    /// Drop the pending run, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }
}

impl<A> Drop for Debounced<A> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<A> std::fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounced")
            .field("quiet", &self.quiet)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

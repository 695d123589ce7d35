//! Run control: a shared stop request checked between downloads.
//!
//! The CLI installs a Ctrl-C handler that calls [`RunControl::request_stop`].
//! The driver checks the flag before starting each item and races it against
//! the pacing sleep, so an interrupt ends the run between items and never
//! abandons a half-written file on our side.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Default)]
struct Inner {
    stop: AtomicBool,
    notify: Notify,
}

/// Cloneable handle; all clones observe the same stop request.
#[derive(Clone, Default)]
pub struct RunControl {
    inner: Arc<Inner>,
}

impl RunControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the run to stop at the next item boundary. Idempotent.
    pub fn request_stop(&self) {
        self.inner.stop.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stop.load(Ordering::SeqCst)
    }

    /// Resolves once a stop has been requested (immediately if it already was).
    pub async fn stopped(&self) {
        let notified = self.inner.notify.notified();
        if self.is_stopped() {
            return;
        }
        notified.await;
    }
}

impl std::fmt::Debug for RunControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunControl")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

//! Pacing between page loads and cooperative shutdown.

use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// How long to pause between page loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPolicy {
    /// The same pause every time.
    Fixed(Duration),
    /// A fresh uniform draw from `[min, max)` every time.
    Range(Duration, Duration),
}

impl WaitPolicy {
    /// Draws the next pause length.
    pub fn sample(&self) -> Duration {
        match *self {
            WaitPolicy::Fixed(duration) => duration,
            WaitPolicy::Range(min, max) => {
                let millis = rand::rng().random_range(min.as_millis()..max.as_millis());
                Duration::from_millis(millis as u64)
            }
        }
    }
}

#[derive(Debug, Default)]
struct StopInner {
    stopped: AtomicBool,
    notify: Notify,
}

/// A clonable stop flag that wakes anything sleeping on it.
///
/// Handed out by the controller so an external owner (a signal handler, a
/// supervisor task) can request shutdown. The session finishes the page in
/// flight and exits at the next loop boundary.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<StopInner>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown and wakes every pending wait.
    pub fn stop(&self) {
        self.inner.stopped.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }

    /// Resolves once shutdown has been requested.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_stopped() {
                return;
            }
            notified.await;
        }
    }

    /// Sleeps for `duration` unless shutdown is requested first.
    ///
    /// Returns false when the sleep was cut short.
    pub async fn sleep(&self, duration: Duration) -> bool {
        if self.is_stopped() {
            return false;
        }

        tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            _ = self.cancelled() => false,
        }
    }
}

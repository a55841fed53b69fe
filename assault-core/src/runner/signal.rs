use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// One-shot broadcast releasing all parked workers at once.
#[derive(Debug, Default)]
pub(super) struct StartSignal {
    started: AtomicBool,
    notify: Notify,
}

impl StartSignal {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn start(&self) {
        self.started.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    pub(super) async fn wait(&self) {
        loop {
            // Register before checking the flag so a concurrent `start` cannot be missed.
            let notified = self.notify.notified();
            if self.started.load(Ordering::Acquire) {
                return;
            }
            notified.await;
        }
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::time::MissedTickBehavior;

/// How often a running dispatch reports progress.
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Requests finished so far (successful or not).
    pub completed: u64,
    pub total: u64,
    pub elapsed: Duration,
}

impl ProgressUpdate {
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

pub type ProgressFn = Arc<dyn Fn(ProgressUpdate) + Send + Sync + 'static>;

pub(super) fn spawn_ticker(
    progress: ProgressFn,
    completed: Arc<AtomicU64>,
    total: u64,
    started: Instant,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PROGRESS_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            let completed = completed.load(Ordering::Relaxed);
            if completed >= total {
                break;
            }
            (progress)(ProgressUpdate {
                completed,
                total,
                elapsed: started.elapsed(),
            });
        }
    })
}

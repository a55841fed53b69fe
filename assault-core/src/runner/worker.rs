use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use assault_http::{HttpClient, HttpRequest};
use tokio::sync::Barrier;

use crate::record::RequestRecord;

use super::signal::StartSignal;

/// One unit of concurrency: issues its share of requests strictly one after another.
pub(super) struct Worker {
    pub(super) id: usize,
    pub(super) share: u64,
    pub(super) request: HttpRequest,
    pub(super) client: Arc<HttpClient>,
    pub(super) completed: Arc<AtomicU64>,
}

impl Worker {
    /// Parks on `ready` and `start`, then runs the share and hands back the records it owns.
    pub(super) async fn run(
        self,
        ready: Arc<Barrier>,
        start: Arc<StartSignal>,
    ) -> Vec<RequestRecord> {
        ready.wait().await;
        start.wait().await;

        tracing::debug!(worker = self.id, requests = self.share, "worker started");

        let mut records = Vec::with_capacity(usize::try_from(self.share).unwrap_or(0));
        for _ in 0..self.share {
            records.push(self.execute_once().await);
            self.completed.fetch_add(1, Ordering::Relaxed);
        }

        tracing::debug!(worker = self.id, "worker finished");
        records
    }

    async fn execute_once(&self) -> RequestRecord {
        let req = self.request.clone();

        let started = Instant::now();
        let res = self.client.request(req).await;
        let elapsed = started.elapsed().as_secs_f64();

        match res {
            Ok(res) => RequestRecord::new(res.status, elapsed),
            Err(err) => {
                let kind = err.transport_error_kind();
                tracing::debug!(worker = self.id, %kind, error = %err, "request failed");
                RequestRecord::failed(kind, elapsed)
            }
        }
    }
}

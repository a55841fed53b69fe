use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use assault_http::{HttpClient, HttpRequest};
use tokio::sync::Barrier;

use crate::config::{RunConfig, RunPlan};
use crate::error::{Error, Result};
use crate::record::RequestRecord;

use super::progress::{ProgressFn, ProgressUpdate, spawn_ticker};
use super::signal::StartSignal;
use super::worker::Worker;

/// Raw output of a dispatch: one record per request, in no particular order.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Wall-clock seconds from releasing the workers until the last one was joined.
    pub total_time: f64,
    pub records: Vec<RequestRecord>,
}

/// Runs `total` GET requests against `url` with `concurrency` workers.
pub async fn dispatch(url: &str, total: u64, concurrency: u64) -> Result<RunOutput> {
    let mut cfg = RunConfig::new(url);
    cfg.total = total;
    cfg.concurrency = concurrency;
    run(&cfg, None).await
}

/// Validates `cfg` and executes the run.
///
/// Configuration errors are returned before any request is sent. Per-request failures never
/// abort the run; they are recorded with the sentinel status.
pub async fn run(cfg: &RunConfig, progress: Option<ProgressFn>) -> Result<RunOutput> {
    let plan = cfg.validate()?;
    let client = Arc::new(HttpClient::new(cfg.connect_timeout));
    execute(plan, client, progress).await
}

/// Like [`run`], but reuses an existing client (and its connection pool).
pub async fn run_with_client(
    cfg: &RunConfig,
    client: Arc<HttpClient>,
    progress: Option<ProgressFn>,
) -> Result<RunOutput> {
    let plan = cfg.validate()?;
    execute(plan, client, progress).await
}

async fn execute(
    plan: RunPlan,
    client: Arc<HttpClient>,
    progress: Option<ProgressFn>,
) -> Result<RunOutput> {
    let total = plan.total();
    let workers = plan.workers();

    let request = HttpRequest {
        method: plan.method,
        url: plan.url.to_string(),
        timeout: Some(plan.request_timeout),
    };

    let completed = Arc::new(AtomicU64::new(0));
    let ready = Arc::new(Barrier::new(workers.saturating_add(1)));
    let start = Arc::new(StartSignal::new());

    let mut handles = Vec::with_capacity(workers);
    for (id, share) in plan.shares.iter().copied().enumerate() {
        let worker = Worker {
            id,
            share,
            request: request.clone(),
            client: client.clone(),
            completed: completed.clone(),
        };
        handles.push(tokio::spawn(worker.run(ready.clone(), start.clone())));
    }

    // Every worker is alive and parked before the clock starts.
    ready.wait().await;

    tracing::info!(url = %plan.url, total, workers, method = %plan.method, "dispatch started");

    let started = Instant::now();
    start.start();

    let ticker = progress
        .as_ref()
        .map(|p| spawn_ticker(p.clone(), completed.clone(), total, started));

    let aborts: Vec<_> = handles.iter().map(|h| h.abort_handle()).collect();
    let mut records: Vec<RequestRecord> = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
    for handle in handles {
        match handle.await {
            Ok(mut part) => records.append(&mut part),
            Err(err) => {
                for a in &aborts {
                    a.abort();
                }
                if let Some(t) = ticker {
                    t.abort();
                }
                return Err(Error::Join(err));
            }
        }
    }

    let elapsed = started.elapsed();

    if let Some(t) = ticker {
        t.abort();
    }
    if let Some(p) = &progress {
        (p)(ProgressUpdate {
            completed: completed.load(Ordering::Relaxed),
            total,
            elapsed,
        });
    }

    let total_time = elapsed.as_secs_f64();
    tracing::info!(total_time, records = records.len(), "dispatch finished");

    Ok(RunOutput {
        total_time,
        records,
    })
}

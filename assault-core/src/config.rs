use std::sync::Arc;
use std::time::Duration;

use assault_http::RequestMethod;

use super::error::{Error, Result};

pub const DEFAULT_TOTAL: u64 = 500;
pub const DEFAULT_CONCURRENCY: u64 = 1;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    /// Total requests issued across all workers.
    pub total: u64,
    /// Requested number of workers; clamped to `total`.
    pub concurrency: u64,
    pub method: RequestMethod,
    /// Bound on every individual request, including reading the response body.
    pub request_timeout: Duration,
    pub connect_timeout: Option<Duration>,
}

impl RunConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            total: DEFAULT_TOTAL,
            concurrency: DEFAULT_CONCURRENCY,
            method: RequestMethod::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
        }
    }

    /// Checks every precondition of a run and resolves how requests are split across workers.
    ///
    /// Nothing is sent over the network here.
    pub fn validate(&self) -> Result<RunPlan> {
        if self.total == 0 {
            return Err(Error::InvalidTotal(self.total));
        }
        if self.concurrency == 0 {
            return Err(Error::InvalidConcurrency(self.concurrency));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::InvalidTimeout);
        }
        validate_url(&self.url)?;

        let workers = self.concurrency.min(self.total);

        Ok(RunPlan {
            url: Arc::from(self.url.as_str()),
            method: self.method,
            request_timeout: self.request_timeout,
            shares: partition(self.total, workers),
        })
    }
}

fn validate_url(raw: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let parsed = url::Url::parse(raw).map_err(|err| invalid(&err.to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(invalid("expected an http:// or https:// URL"));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host"));
    }
    Ok(())
}

/// A validated run: immutable inputs shared by all workers.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub url: Arc<str>,
    pub method: RequestMethod,
    pub request_timeout: Duration,
    /// Requests assigned to each worker; one entry per worker.
    pub shares: Vec<u64>,
}

impl RunPlan {
    #[must_use]
    pub fn workers(&self) -> usize {
        self.shares.len()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.shares.iter().sum()
    }
}

/// Splits `total` requests over `workers` so that no two shares differ by more than one.
///
/// The first `total % workers` workers take the extra request. Returns an empty split when
/// `workers` is zero.
#[must_use]
pub fn partition(total: u64, workers: u64) -> Vec<u64> {
    if workers == 0 {
        return Vec::new();
    }

    let base = total / workers;
    let extra = total % workers;
    (0..workers)
        .map(|idx| if idx < extra { base + 1 } else { base })
        .collect()
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::Result;
use super::stats::Results;

/// Final report of a run, in the shape consumed by the console and JSON renderers.
///
/// Latencies and `total_time` are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub total_requests: u64,
    pub successful_requests: u64,
    /// Non-2xx responses plus transport failures.
    pub failed_requests: u64,
    pub slowest: f64,
    pub fastest: f64,
    pub average: f64,
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
    pub total_time: f64,
    pub requests_per_minute: u64,
    pub requests_per_second: u64,
    /// Transport failures by kind (`timeout`, `request`, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub transport_errors: BTreeMap<String, u64>,
}

impl Report {
    pub fn from_results(results: &Results) -> Result<Self> {
        Ok(Self {
            total_requests: results.total_requests(),
            successful_requests: results.successful_requests(),
            failed_requests: results.failed_requests(),
            slowest: results.slowest()?,
            fastest: results.fastest()?,
            average: results.average_time()?,
            p50: results.percentile(50.0)?,
            p90: results.percentile(90.0)?,
            p99: results.percentile(99.0)?,
            total_time: results.total_time(),
            requests_per_minute: results.requests_per_minute()?,
            requests_per_second: results.requests_per_second()?,
            transport_errors: results
                .transport_errors()
                .into_iter()
                .map(|(kind, count)| (kind.to_string(), count))
                .collect(),
        })
    }
}

use std::collections::BTreeMap;

use assault_http::HttpTransportErrorKind;

use super::error::{Error, Result};
use super::record::{Outcome, RequestRecord};
use super::runner::RunOutput;

/// Read-only statistics over the records of one run.
///
/// Records are sorted by descending `request_time` on construction (stable, so equal
/// latencies keep their arrival order). Every query is a pure read of that frozen view.
#[derive(Debug, Clone)]
pub struct Results {
    total_time: f64,
    records: Vec<RequestRecord>,
}

impl Results {
    pub fn new(total_time: f64, mut records: Vec<RequestRecord>) -> Result<Self> {
        if !total_time.is_finite() || total_time < 0.0 {
            return Err(Error::InvalidMeasurement(format!(
                "total_time must be a finite, non-negative number of seconds (got {total_time})"
            )));
        }

        if let Some((idx, bad)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| !r.request_time.is_finite() || r.request_time < 0.0)
        {
            return Err(Error::InvalidMeasurement(format!(
                "record #{idx} has request_time={} (expected finite seconds >= 0)",
                bad.request_time
            )));
        }

        records.sort_by(|a, b| b.request_time.total_cmp(&a.request_time));

        Ok(Self {
            total_time,
            records,
        })
    }

    pub fn from_output(output: RunOutput) -> Result<Self> {
        Self::new(output.total_time, output.records)
    }

    #[must_use]
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Records sorted slowest first.
    #[must_use]
    pub fn records(&self) -> &[RequestRecord] {
        &self.records
    }

    #[must_use]
    pub fn total_requests(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn slowest(&self) -> Result<f64> {
        self.records
            .first()
            .map(|r| r.request_time)
            .ok_or(Error::EmptyResults)
    }

    pub fn fastest(&self) -> Result<f64> {
        self.records
            .last()
            .map(|r| r.request_time)
            .ok_or(Error::EmptyResults)
    }

    pub fn average_time(&self) -> Result<f64> {
        if self.records.is_empty() {
            return Err(Error::EmptyResults);
        }

        // Neumaier summation keeps long runs of small latencies from drifting.
        let mut sum = 0.0f64;
        let mut compensation = 0.0f64;
        for r in &self.records {
            let v = r.request_time;
            let t = sum + v;
            if sum.abs() >= v.abs() {
                compensation += (sum - t) + v;
            } else {
                compensation += (v - t) + sum;
            }
            sum = t;
        }

        Ok((sum + compensation) / (self.records.len() as f64))
    }

    /// Requests answered with a status in `200..=299`.
    #[must_use]
    pub fn successful_requests(&self) -> u64 {
        self.records.iter().filter(|r| r.is_success()).count() as u64
    }

    /// Everything that is not a 2xx, including transport failures.
    #[must_use]
    pub fn failed_requests(&self) -> u64 {
        self.total_requests() - self.successful_requests()
    }

    pub fn requests_per_minute(&self) -> Result<u64> {
        self.rate_per(60.0)
    }

    pub fn requests_per_second(&self) -> Result<u64> {
        self.rate_per(1.0)
    }

    /// `round(window_secs * count / total_time)`, rounding half to even.
    fn rate_per(&self, window_secs: f64) -> Result<u64> {
        if self.total_time <= 0.0 {
            return Err(Error::ZeroElapsed(self.total_time));
        }

        let rate = window_secs * (self.records.len() as f64) / self.total_time;
        Ok(rate.round_ties_even() as u64)
    }

    /// Nearest-rank percentile of request latency, `p` in `0..=100`.
    pub fn percentile(&self, p: f64) -> Result<f64> {
        if !(0.0..=100.0).contains(&p) {
            return Err(Error::InvalidPercentile(p));
        }
        if self.records.is_empty() {
            return Err(Error::EmptyResults);
        }

        let n = self.records.len();
        let rank = ((p / 100.0) * (n as f64)).ceil() as usize;
        let rank = rank.clamp(1, n);

        // Sorted descending: the k-th smallest lives at `n - k`.
        Ok(self.records[n - rank].request_time)
    }

    #[must_use]
    pub fn outcome_counts(&self) -> BTreeMap<Outcome, u64> {
        let mut out = BTreeMap::new();
        for r in &self.records {
            *out.entry(r.outcome()).or_insert(0) += 1;
        }
        out
    }

    #[must_use]
    pub fn transport_errors(&self) -> BTreeMap<HttpTransportErrorKind, u64> {
        let mut out = BTreeMap::new();
        for kind in self.records.iter().filter_map(|r| r.transport_error) {
            *out.entry(kind).or_insert(0) += 1;
        }
        out
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("`requests` must be a positive integer (got {0})")]
    InvalidTotal(u64),

    #[error("`concurrency` must be a positive integer (got {0})")]
    InvalidConcurrency(u64),

    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("`timeout` must be a positive duration")]
    InvalidTimeout,

    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("no requests were recorded; latency statistics are undefined")]
    EmptyResults,

    #[error("total run time is {0}s; throughput is undefined for a zero-length run")]
    ZeroElapsed(f64),

    #[error("invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("percentile must be within 0..=100 (got {0})")]
    InvalidPercentile(f64),
}

impl Error {
    /// Whether the error was caused by run configuration rather than by the run itself.
    ///
    /// Configuration errors are detected before any request is sent.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidTotal(_)
                | Self::InvalidConcurrency(_)
                | Self::InvalidUrl { .. }
                | Self::InvalidTimeout
        )
    }
}

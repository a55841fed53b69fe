mod config;
mod error;
mod record;
mod report;
mod stats;

pub mod runner;

pub use assault_http::{HttpClient, HttpTransportErrorKind, RequestMethod};
pub use config::{
    DEFAULT_CONCURRENCY, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TOTAL,
    RunConfig, RunPlan, partition,
};
pub use error::{Error, Result};
pub use record::{Outcome, RequestRecord, SENTINEL_STATUS};
pub use report::Report;
pub use runner::{ProgressFn, ProgressUpdate, RunOutput, dispatch, run};
pub use stats::Results;

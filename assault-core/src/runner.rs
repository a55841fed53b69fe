mod dispatch;
mod progress;
mod signal;
mod worker;

pub use dispatch::{RunOutput, dispatch, run, run_with_client};
pub use progress::{PROGRESS_INTERVAL, ProgressFn, ProgressUpdate};

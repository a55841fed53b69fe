mod format;
mod progress;
mod summary;

use progress::HumanProgress;
use std::sync::Arc;

use super::OutputFormatter;

pub(crate) struct HumanReadableOutput {
    progress: Arc<HumanProgress>,
}

impl HumanReadableOutput {
    pub(crate) fn new() -> Self {
        Self {
            progress: Arc::new(HumanProgress::new()),
        }
    }
}

impl OutputFormatter for HumanReadableOutput {
    fn print_header(&self, cfg: &assault_core::RunConfig) {
        println!("url: {}", cfg.url);
        println!("method: {}", cfg.method);
        println!("requests: {}", cfg.total);
        println!("concurrency: {}", cfg.concurrency.min(cfg.total));
        println!();
    }

    fn progress(&self) -> Option<assault_core::ProgressFn> {
        let progress = self.progress.clone();
        Some(Arc::new(move |u| progress.update(u)))
    }

    fn print_summary(&self, report: &assault_core::Report) -> anyhow::Result<()> {
        self.progress.finish();
        print!("{}", summary::render(report));
        Ok(())
    }
}

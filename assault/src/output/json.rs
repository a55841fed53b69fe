use std::io::Write as _;

use anyhow::Context as _;

use super::OutputFormatter;

pub(crate) struct JsonOutput;

impl OutputFormatter for JsonOutput {
    fn print_header(&self, _cfg: &assault_core::RunConfig) {}

    fn progress(&self) -> Option<assault_core::ProgressFn> {
        None
    }

    fn print_summary(&self, report: &assault_core::Report) -> anyhow::Result<()> {
        let body = render_pretty(report)?;
        let mut out = std::io::stdout().lock();
        out.write_all(body.as_bytes())
            .and_then(|()| out.write_all(b"\n"))
            .and_then(|()| out.flush())
            .context("failed to write report to stdout")
    }
}

pub(crate) fn render_pretty(report: &assault_core::Report) -> anyhow::Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}

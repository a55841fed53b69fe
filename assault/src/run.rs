use anyhow::Context as _;
use std::path::Path;

use crate::cli::Cli;
use crate::output;
use crate::run_error::RunError;

pub async fn run(args: Cli) -> Result<(), RunError> {
    let cfg = args.run_config();

    // Reject bad input before printing anything or touching the network.
    cfg.validate()?;

    let out = output::formatter(args.output);
    out.print_header(&cfg);

    let output = assault_core::run(&cfg, out.progress()).await?;
    let results = assault_core::Results::from_output(output)?;
    let report = assault_core::Report::from_results(&results)
        .context("failed to compute report")
        .map_err(RunError::RuntimeError)?;

    out.print_summary(&report).map_err(RunError::RuntimeError)?;

    if let Some(path) = &args.json_file {
        write_json_report(path, &report)
            .await
            .map_err(RunError::RuntimeError)?;
        tracing::info!(path = %path.display(), "json report written");
    }

    Ok(())
}

async fn write_json_report(path: &Path, report: &assault_core::Report) -> anyhow::Result<()> {
    let body = output::render_json(report)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create report output dir: {}", parent.display()))?;
    }
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("failed to write json report: {}", path.display()))
}

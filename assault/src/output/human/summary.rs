use std::fmt::Write as _;

use super::format::format_seconds;

pub(crate) fn render(report: &assault_core::Report) -> String {
    let mut out = String::new();

    out.push_str("summary\n");
    writeln!(
        out,
        "  successful requests   {} of {}",
        report.successful_requests, report.total_requests
    )
    .ok();

    if report.failed_requests > 0 {
        writeln!(out, "  failed requests       {}", report.failed_requests).ok();
    }
    if !report.transport_errors.is_empty() {
        let breakdown = report
            .transport_errors
            .iter()
            .map(|(kind, count)| format!("{kind}={count}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            out,
            "  transport errors      {breakdown} (no response; not counted as successful)"
        )
        .ok();
    }

    writeln!(out, "  slowest               {}", format_seconds(report.slowest)).ok();
    writeln!(out, "  fastest               {}", format_seconds(report.fastest)).ok();
    writeln!(out, "  average               {}", format_seconds(report.average)).ok();
    writeln!(
        out,
        "  latency               p50={} p90={} p99={}",
        format_seconds(report.p50),
        format_seconds(report.p90),
        format_seconds(report.p99)
    )
    .ok();
    writeln!(out, "  total time            {}", format_seconds(report.total_time)).ok();
    writeln!(out, "  requests per minute   {}", report.requests_per_minute).ok();
    writeln!(out, "  requests per second   {}", report.requests_per_second).ok();

    out
}

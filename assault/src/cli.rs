use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

use assault_core::{DEFAULT_CONCURRENCY, DEFAULT_TOTAL, RequestMethod};

const DURATION_HINT: &str = "expected e.g. 30s, 250ms, 1.5s, 2m";

fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err(format!("duration cannot be empty ({DURATION_HINT})"));
    }

    let number_end = s
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit() && *ch != '.')
        .map_or(s.len(), |(idx, _)| idx);
    let (number_str, unit_str) = s.split_at(number_end);

    let value: f64 = number_str
        .parse()
        .map_err(|_| format!("invalid duration '{s}' ({DURATION_HINT})"))?;

    let unit_secs = match unit_str.trim() {
        "" | "s" | "sec" | "secs" | "second" | "seconds" => 1.0,
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1e-3,
        "us" | "µs" | "usec" | "usecs" | "microsecond" | "microseconds" => 1e-6,
        "m" | "min" | "mins" | "minute" | "minutes" => 60.0,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3600.0,
        _ => return Err(format!("invalid duration '{s}' ({DURATION_HINT})")),
    };

    Duration::try_from_secs_f64(value * unit_secs)
        .map_err(|_| format!("duration '{s}' is out of range"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    HumanReadable,
    /// A single JSON report document on stdout.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Method {
    Get,
    Head,
}

impl From<Method> for RequestMethod {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => Self::Get,
            Method::Head => Self::Head,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "assault",
    author,
    version,
    about = "Simple HTTP load generator",
    long_about = "assault issues a fixed number of HTTP requests against a single URL, spread across concurrent workers, and reports latency and throughput.\n\nEach worker sends its share of requests one after another; workers run in parallel. Failed requests (connection errors, timeouts) are counted and reported, never retried.",
    after_help = "Examples:\n  assault http://localhost:8080/\n  assault -r 1000 -c 20 http://localhost:8080/health\n  assault -r 200 -c 4 -j report.json https://example.com/\n  assault --output json --timeout 2s http://localhost:8080/"
)]
pub struct Cli {
    /// Target URL (absolute http:// or https://)
    pub url: String,

    /// Total number of requests
    #[arg(short = 'r', long, default_value_t = DEFAULT_TOTAL)]
    pub requests: u64,

    /// Number of concurrent workers (clamped to the number of requests)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: u64,

    /// Also write the JSON report to this file
    #[arg(short = 'j', long, value_name = "PATH")]
    pub json_file: Option<PathBuf>,

    /// Output format for the report on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::HumanReadable)]
    pub output: OutputFormat,

    /// Per-request timeout, including reading the response body (e.g. 30s, 500ms)
    #[arg(long, value_parser = parse_duration, default_value = "30s")]
    pub timeout: Duration,

    /// TCP connect timeout (e.g. 3s)
    #[arg(long, value_parser = parse_duration, default_value = "3s")]
    pub connect_timeout: Duration,

    /// Request method (idempotent reads only)
    #[arg(long, value_enum, default_value_t = Method::Get)]
    pub method: Method,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn run_config(&self) -> assault_core::RunConfig {
        let mut cfg = assault_core::RunConfig::new(self.url.clone());
        cfg.total = self.requests;
        cfg.concurrency = self.concurrency;
        cfg.method = self.method.into();
        cfg.request_timeout = self.timeout;
        cfg.connect_timeout = Some(self.connect_timeout);
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_accepts_common_units() {
        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_duration("10s"), Ok(Duration::from_secs(10)));
        assert_eq!(parse_duration("10"), Ok(Duration::from_secs(10)));
        assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_duration("1m"), Ok(Duration::from_secs(60)));
        assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(2 * 60 * 60)));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("10x").is_err());
        assert!(parse_duration("1.2.3s").is_err());
    }

    #[test]
    fn cli_applies_defaults() {
        let cli = match Cli::try_parse_from(["assault", "http://localhost:8080/"]) {
            Ok(v) => v,
            Err(err) => panic!("failed to parse args: {err}"),
        };

        assert_eq!(cli.url, "http://localhost:8080/");
        assert_eq!(cli.requests, 500);
        assert_eq!(cli.concurrency, 1);
        assert_eq!(cli.json_file, None);
        assert_eq!(cli.output, OutputFormat::HumanReadable);
        assert_eq!(cli.timeout, Duration::from_secs(30));
        assert_eq!(cli.method, Method::Get);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_parses_short_flags() {
        let parsed = Cli::try_parse_from([
            "assault",
            "-r",
            "100",
            "-c",
            "10",
            "-j",
            "out/report.json",
            "-vv",
            "--method",
            "head",
            "--timeout",
            "500ms",
            "https://example.com/",
        ]);
        let cli = match parsed {
            Ok(v) => v,
            Err(err) => panic!("failed to parse args: {err}"),
        };

        assert_eq!(cli.requests, 100);
        assert_eq!(cli.concurrency, 10);
        assert_eq!(cli.json_file, Some(PathBuf::from("out/report.json")));
        assert_eq!(cli.verbose, 2);

        let cfg = cli.run_config();
        assert_eq!(cfg.total, 100);
        assert_eq!(cfg.concurrency, 10);
        assert_eq!(cfg.method, RequestMethod::Head);
        assert_eq!(cfg.request_timeout, Duration::from_millis(500));
    }

    #[test]
    fn cli_requires_url() {
        assert!(Cli::try_parse_from(["assault", "-r", "10"]).is_err());
    }
}

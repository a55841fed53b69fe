use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context as _;
use assault_core::{
    HttpTransportErrorKind, Outcome, ProgressUpdate, Report, Results, RunConfig, SENTINEL_STATUS,
    dispatch, run,
};
use assault_testserver::{SLOW_LATENCY, TestServer};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn fixed_latency_target_is_bounded_by_sequential_share() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;

    let out = dispatch(&server.urls().slow, 100, 10).await?;
    let max_in_flight = server.stats().max_in_flight();
    let seen = server.stats().requests_total();
    server.shutdown().await;

    anyhow::ensure!(out.records.len() == 100, "got {} records", out.records.len());
    anyhow::ensure!(seen == 100, "server saw {seen} requests");
    anyhow::ensure!(
        max_in_flight <= 10,
        "more requests in flight than workers: {max_in_flight}"
    );

    let results = Results::from_output(out)?;
    anyhow::ensure!(results.successful_requests() == 100);

    // 10 workers x 10 sequential requests x 50ms.
    let floor = (SLOW_LATENCY * 10).as_secs_f64();
    anyhow::ensure!(
        results.total_time() >= floor,
        "total_time={} below {floor}",
        results.total_time()
    );
    anyhow::ensure!(
        results.total_time() < floor * 10.0,
        "total_time={} is far above {floor}",
        results.total_time()
    );
    anyhow::ensure!(results.total_time() >= results.slowest()?);
    anyhow::ensure!(results.fastest()? >= SLOW_LATENCY.as_secs_f64());
    Ok(())
}

#[tokio::test]
async fn produces_exactly_total_records_for_uneven_split() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;

    let out = dispatch(&server.urls().hello, 37, 5).await?;
    server.shutdown().await;

    anyhow::ensure!(out.records.len() == 37, "got {} records", out.records.len());
    anyhow::ensure!(out.records.iter().all(|r| r.status_code == 200));

    let slowest = out
        .records
        .iter()
        .map(|r| r.request_time)
        .fold(0.0f64, f64::max);
    anyhow::ensure!(out.total_time >= slowest);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrency_above_total_is_clamped() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;

    let out = dispatch(&server.urls().slow, 3, 50).await?;
    let max_in_flight = server.stats().max_in_flight();
    server.shutdown().await;

    anyhow::ensure!(out.records.len() == 3);
    anyhow::ensure!(max_in_flight <= 3, "max_in_flight={max_in_flight}");
    Ok(())
}

#[tokio::test]
async fn non_2xx_responses_are_recorded_but_not_successful() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;

    let out = dispatch(&server.urls().status(503), 6, 2).await?;
    server.shutdown().await;

    let results = Results::from_output(out)?;
    anyhow::ensure!(results.total_requests() == 6);
    anyhow::ensure!(results.successful_requests() == 0);
    anyhow::ensure!(results.outcome_counts().get(&Outcome::ServerError) == Some(&6));
    Ok(())
}

#[tokio::test]
async fn connection_failures_are_recorded_with_sentinel_status() -> anyhow::Result<()> {
    // Grab a free port and release it so connects are refused.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let url = format!("http://{addr}/");
    let out = dispatch(&url, 5, 2).await?;

    anyhow::ensure!(out.records.len() == 5, "got {} records", out.records.len());
    for r in &out.records {
        anyhow::ensure!(r.status_code == SENTINEL_STATUS, "status {}", r.status_code);
        anyhow::ensure!(r.transport_error == Some(HttpTransportErrorKind::Request));
        anyhow::ensure!(r.request_time >= 0.0);
    }

    let results = Results::from_output(out)?;
    anyhow::ensure!(results.successful_requests() == 0);

    let report = Report::from_results(&results)?;
    anyhow::ensure!(report.transport_errors.get("request") == Some(&5));
    Ok(())
}

#[tokio::test]
async fn request_timeout_turns_into_failed_record() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;

    let mut cfg = RunConfig::new(server.urls().slow.clone());
    cfg.total = 4;
    cfg.concurrency = 2;
    cfg.request_timeout = Duration::from_millis(5);

    let out = run(&cfg, None).await?;
    server.shutdown().await;

    anyhow::ensure!(out.records.len() == 4);
    anyhow::ensure!(
        out.records
            .iter()
            .all(|r| r.transport_error == Some(HttpTransportErrorKind::Timeout)),
        "expected only timeouts: {:?}",
        out.records
    );
    Ok(())
}

#[tokio::test]
async fn configuration_errors_abort_before_any_request() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let url = server.urls().hello.clone();

    let zero_total = dispatch(&url, 0, 1).await;
    let zero_concurrency = dispatch(&url, 10, 0).await;
    let bad_url = dispatch("ftp://127.0.0.1/", 10, 1).await;

    let seen = server.stats().requests_total();
    server.shutdown().await;

    for res in [zero_total, zero_concurrency, bad_url] {
        match res {
            Ok(_) => anyhow::bail!("expected a configuration error"),
            Err(err) => anyhow::ensure!(err.is_configuration(), "unexpected error: {err}"),
        }
    }
    anyhow::ensure!(seen == 0, "server saw {seen} requests");
    Ok(())
}

#[tokio::test]
async fn progress_reports_completion() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;

    let updates: Arc<Mutex<Vec<ProgressUpdate>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = updates.clone();

    let mut cfg = RunConfig::new(server.urls().hello.clone());
    cfg.total = 20;
    cfg.concurrency = 4;

    let out = run(
        &cfg,
        Some(Arc::new(move |u: ProgressUpdate| {
            sink.lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(u);
        })),
    )
    .await?;
    server.shutdown().await;

    let updates = updates
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone();
    let last = updates.last().context("no progress updates")?;

    anyhow::ensure!(out.records.len() == 20);
    anyhow::ensure!(last.is_done(), "last update: {last:?}");
    anyhow::ensure!(last.completed == 20 && last.total == 20);
    anyhow::ensure!(
        updates.windows(2).all(|w| w[0].completed <= w[1].completed),
        "progress went backwards: {updates:?}"
    );
    Ok(())
}

#[tokio::test]
async fn shared_client_serves_consecutive_runs() -> anyhow::Result<()> {
    let server = TestServer::start().await.context("start test server")?;
    let client = Arc::new(assault_core::HttpClient::default());

    let mut cfg = RunConfig::new(server.urls().hello.clone());
    cfg.total = 8;
    cfg.concurrency = 2;

    let first = assault_core::runner::run_with_client(&cfg, client.clone(), None).await?;
    let second = assault_core::runner::run_with_client(&cfg, client, None).await?;
    let seen = server.stats().requests_total();
    server.shutdown().await;

    anyhow::ensure!(first.records.len() == 8 && second.records.len() == 8);
    anyhow::ensure!(seen == 16, "server saw {seen} requests");
    Ok(())
}

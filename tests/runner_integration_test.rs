use anyhow::Result;
use httpmock::prelude::*;
use order_loadtest::core::user::WaitTime;
use order_loadtest::config::ConfigProvider;
use order_loadtest::utils::validation::Validate;
use order_loadtest::{LoadTestRunner, ReqwestTransport, RunSettings, ScenarioConfig};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn quick_settings(users: usize) -> RunSettings {
    RunSettings {
        users,
        run_time: Duration::from_millis(300),
        wait_time: WaitTime::constant(Duration::from_millis(10)),
        seed: Some(1),
        ..RunSettings::default()
    }
}

#[tokio::test]
async fn test_runner_against_accepting_server() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/orders/async");
        then.status(202).body("{}");
    });

    let transport = ReqwestTransport::new(&server.base_url(), Some(Duration::from_secs(5)))?;
    let runner = LoadTestRunner::new(quick_settings(3), Arc::new(transport));
    let report = runner.run().await?;

    assert!(report.iterations >= 3);
    assert_eq!(api_mock.hits() as u64, report.iterations);

    let endpoint = report
        .stats
        .get("POST", "/orders/async")
        .expect("stats for /orders/async");
    assert_eq!(endpoint.successes, report.iterations);
    assert_eq!(endpoint.failures, 0);
    assert!(endpoint.mean_response_time_ms().is_some());
    Ok(())
}

#[tokio::test]
async fn test_runner_counts_rejections_as_failures() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/orders/async");
        then.status(500);
    });

    let transport = ReqwestTransport::new(&server.base_url(), None)?;
    let runner = LoadTestRunner::new(quick_settings(2), Arc::new(transport));
    let report = runner.run().await?;

    let endpoint = report
        .stats
        .get("POST", "/orders/async")
        .expect("stats for /orders/async");
    assert_eq!(endpoint.successes, 0);
    assert_eq!(endpoint.failures, report.iterations);
    assert_eq!(
        endpoint.failure_messages.get("Got status code 500").copied(),
        Some(report.iterations)
    );
    assert_eq!(endpoint.mean_response_time_ms(), None);
    Ok(())
}

#[tokio::test]
async fn test_runner_survives_unreachable_host() -> Result<()> {
    let transport = ReqwestTransport::new("http://127.0.0.1:1", Some(Duration::from_secs(1)))?;
    let runner = LoadTestRunner::new(quick_settings(1), Arc::new(transport));
    let report = runner.run().await?;

    assert!(report.iterations >= 1);
    assert_eq!(report.stats.total_failures(), report.iterations);
    Ok(())
}

#[tokio::test]
async fn test_scenario_file_drives_runner() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/async")
            .body_contains("\"customer_id\":7");
        then.status(202).body("{\"accepted\":true}");
    });

    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("scenario.toml");
    let content = format!(
        r#"
[target]
host = "{}"
timeout_seconds = 5

[users]
count = 2
run_time_seconds = 1
wait_min_seconds = 0.05
wait_max_seconds = 0.1
seed = 99

[payload]
customer_id = [7, 7]
items_per_order = [1, 2]
"#,
        server.base_url()
    );
    tokio::fs::write(&config_path, content).await?;

    let config = ScenarioConfig::from_file(&config_path)?;
    config.validate()?;

    let transport = ReqwestTransport::new(config.host(), config.request_timeout())?;
    let runner = LoadTestRunner::new(config.run_settings()?, Arc::new(transport));
    let report = runner.run().await?;

    assert!(report.iterations >= 2);
    assert_eq!(api_mock.hits() as u64, report.iterations);
    assert_eq!(report.stats.total_failures(), 0);

    let endpoint = report
        .stats
        .get("POST", "/orders/async")
        .expect("stats for /orders/async");
    assert_eq!(endpoint.total_bytes, 17 * report.iterations);
    Ok(())
}

use clap::Parser;
use order_loadtest::config::ConfigProvider;
use order_loadtest::utils::error::ErrorSeverity;
use order_loadtest::utils::{logger, validation::Validate};
use order_loadtest::{CliConfig, LoadTestError, LoadTestRunner, ReqwestTransport, RunReport, ScenarioConfig};
use std::sync::Arc;

async fn run(provider: &dyn ConfigProvider) -> order_loadtest::Result<RunReport> {
    let transport = ReqwestTransport::new(provider.host(), provider.request_timeout())?;
    tracing::info!("🎯 Target host: {}", transport.base_url());

    let runner = LoadTestRunner::new(provider.run_settings()?, Arc::new(transport));
    let report = runner.run().await?;
    runner.stats().log_summary();
    Ok(report)
}

fn load_provider(config: &CliConfig) -> order_loadtest::Result<Box<dyn ConfigProvider>> {
    match &config.config {
        Some(path) => {
            tracing::info!("📄 Loading scenario from {}", path);
            let scenario = ScenarioConfig::from_file(path)?;
            scenario.validate()?;
            Ok(Box::new(scenario))
        }
        None => {
            config.validate()?;
            Ok(Box::new(config.clone()))
        }
    }
}

fn exit_with(e: &LoadTestError) -> ! {
    tracing::error!(
        "❌ Load test failed: {} (Severity: {:?})",
        e,
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting order-loadtest");
    tracing::debug!("CLI config: {:?}", config);

    let provider = match load_provider(&config) {
        Ok(provider) => provider,
        Err(e) => exit_with(&e),
    };

    match run(provider.as_ref()).await {
        Ok(report) => {
            let failures = report.stats.total_failures();
            println!(
                "✅ {} requests in {:.1}s, {} failed",
                report.stats.total_requests(),
                report.elapsed.as_secs_f64(),
                failures
            );
        }
        Err(e) => exit_with(&e),
    }
}

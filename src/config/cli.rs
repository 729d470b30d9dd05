use crate::core::payload::PayloadRanges;
use crate::core::runner::RunSettings;
use crate::core::user::WaitTime;
use crate::config::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "order-loadtest")]
#[command(about = "Load test for the async order endpoint (POST /orders/async)")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:8000")]
    pub host: String,

    #[arg(long, short = 'u', default_value = "10")]
    pub users: usize,

    #[arg(long, default_value = "30")]
    pub run_time_secs: u64,

    #[arg(long, default_value = "0.1")]
    pub wait_min_secs: f64,

    #[arg(long, default_value = "0.5")]
    pub wait_max_secs: f64,

    #[arg(long, help = "Per-request timeout in seconds")]
    pub timeout_secs: Option<u64>,

    #[arg(long, help = "Seed for reproducible payloads")]
    pub seed: Option<u64>,

    #[arg(long, help = "TOML scenario file; replaces the run options above")]
    pub config: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn run_settings(&self) -> Result<RunSettings> {
        Ok(RunSettings {
            users: self.users,
            run_time: Duration::from_secs(self.run_time_secs),
            wait_time: WaitTime::between(self.wait_min_secs, self.wait_max_secs)?,
            seed: self.seed,
            payload: PayloadRanges::default(),
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("host", &self.host)?;
        validate_positive_number("users", self.users, 1)?;
        if let Some(timeout) = self.timeout_secs {
            validate_positive_number("timeout_secs", timeout as usize, 1)?;
        }
        self.run_settings()?.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{ErrorSeverity, LoadTestError};

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["order-loadtest"]);
        assert_eq!(config.host, "http://localhost:8000");
        assert_eq!(config.users, 10);
        assert!(config.validate().is_ok());

        let settings = config.run_settings().unwrap();
        assert_eq!(settings.wait_time, WaitTime::default());
        assert_eq!(settings.run_time, Duration::from_secs(30));
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_cli_overrides() {
        let config = CliConfig::parse_from([
            "order-loadtest",
            "--host",
            "https://orders.example.com",
            "-u",
            "50",
            "--timeout-secs",
            "5",
            "--seed",
            "7",
        ]);
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.run_settings().unwrap().users, 50);
        assert_eq!(config.run_settings().unwrap().seed, Some(7));
    }

    #[test]
    fn test_cli_validation_errors() {
        let bad_host = CliConfig::parse_from(["order-loadtest", "--host", "orders"]);
        assert!(bad_host.validate().is_err());

        let bad_wait = CliConfig::parse_from([
            "order-loadtest",
            "--wait-min-secs",
            "2",
            "--wait-max-secs",
            "1",
        ]);
        assert!(bad_wait.validate().is_err());

        let no_users = CliConfig::parse_from(["order-loadtest", "--users", "0"]);
        assert!(no_users.validate().is_err());
    }

    #[test]
    fn test_cli_oversized_wait_is_config_error() {
        // 過大的秒數要回報設定錯誤，不能讓 Duration 轉換 panic
        let config = CliConfig::parse_from(["order-loadtest", "--wait-max-secs", "1e20"]);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, LoadTestError::InvalidConfigValueError { .. }));
        assert_eq!(err.severity(), ErrorSeverity::High);

        let config = CliConfig::parse_from([
            "order-loadtest",
            "--wait-min-secs",
            "1e20",
            "--wait-max-secs",
            "1e21",
        ]);
        assert!(config.run_settings().is_err());
    }
}

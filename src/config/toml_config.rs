use crate::core::payload::PayloadRanges;
use crate::core::runner::RunSettings;
use crate::core::user::{WaitTime, MAX_WAIT_SECONDS};
use crate::config::ConfigProvider;
use crate::utils::error::{LoadTestError, Result};
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub target: TargetConfig,
    #[serde(default)]
    pub users: UsersConfig,
    #[serde(default)]
    pub payload: PayloadRanges,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub host: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersConfig {
    pub count: Option<usize>,
    pub run_time_seconds: Option<u64>,
    pub wait_min_seconds: Option<f64>,
    pub wait_max_seconds: Option<f64>,
    pub seed: Option<u64>,
}

const DEFAULT_USERS: usize = 10;
const DEFAULT_RUN_TIME_SECONDS: u64 = 30;
const DEFAULT_WAIT_MIN_SECONDS: f64 = 0.1;
const DEFAULT_WAIT_MAX_SECONDS: f64 = 0.5;

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入情境設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LoadTestError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析，先替換 `${VAR}` 環境變數
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| LoadTestError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    fn wait_bounds(&self) -> (f64, f64) {
        (
            self.users.wait_min_seconds.unwrap_or(DEFAULT_WAIT_MIN_SECONDS),
            self.users.wait_max_seconds.unwrap_or(DEFAULT_WAIT_MAX_SECONDS),
        )
    }
}

impl ConfigProvider for ScenarioConfig {
    fn host(&self) -> &str {
        &self.target.host
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.target.timeout_seconds.map(Duration::from_secs)
    }

    fn run_settings(&self) -> Result<RunSettings> {
        let (wait_min, wait_max) = self.wait_bounds();

        Ok(RunSettings {
            users: self.users.count.unwrap_or(DEFAULT_USERS),
            run_time: Duration::from_secs(
                self.users.run_time_seconds.unwrap_or(DEFAULT_RUN_TIME_SECONDS),
            ),
            wait_time: WaitTime::between(wait_min, wait_max)?,
            seed: self.users.seed,
            payload: self.payload.clone(),
        })
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        validate_url("target.host", &self.target.host)?;

        if let Some(timeout) = self.target.timeout_seconds {
            validate_positive_number("target.timeout_seconds", timeout as usize, 1)?;
        }
        if let Some(count) = self.users.count {
            validate_positive_number("users.count", count, 1)?;
        }

        let (wait_min, wait_max) = self.wait_bounds();
        validate_range("users.wait_min_seconds", wait_min, 0.0, MAX_WAIT_SECONDS)?;
        validate_range("users.wait_max_seconds", wait_max, 0.0, MAX_WAIT_SECONDS)?;

        self.run_settings()?.validate()
    }
}

use crate::core::runner::RunSettings;
use crate::utils::error::Result;
use std::time::Duration;

#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::ScenarioConfig;

/// 任何設定來源（CLI 或 TOML 情境檔）都要能產出這些值
pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn run_settings(&self) -> Result<RunSettings>;
}

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{ConfigProvider, ScenarioConfig};

pub use adapters::http::ReqwestTransport;
pub use crate::core::{
    runner::{LoadTestRunner, RunReport, RunSettings},
    stats::RequestStats,
    task::OrderTask,
};
pub use utils::error::{LoadTestError, Result};

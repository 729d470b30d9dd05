use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadTestError {
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Runner error: {message}")]
    RunnerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl LoadTestError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LoadTestError::Transport(_) => ErrorSeverity::Medium,
            LoadTestError::SerializationError(_) => ErrorSeverity::High,
            LoadTestError::ConfigError { .. }
            | LoadTestError::InvalidConfigValueError { .. }
            | LoadTestError::MissingConfigError { .. } => ErrorSeverity::High,
            LoadTestError::IoError(_) | LoadTestError::RunnerError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LoadTestError::Transport(_) => {
                "Check that the target host is reachable and accepts POST /orders/async"
            }
            LoadTestError::SerializationError(_) => "Check the generated order payload shape",
            LoadTestError::ConfigError { .. }
            | LoadTestError::InvalidConfigValueError { .. }
            | LoadTestError::MissingConfigError { .. } => {
                "Fix the CLI arguments or the scenario TOML file and try again"
            }
            LoadTestError::IoError(_) => "Check file paths and permissions",
            LoadTestError::RunnerError { .. } => "Re-run with --verbose and inspect the logs",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LoadTestError::Transport(e) if e.is_timeout() => {
                "The target host did not answer in time".to_string()
            }
            LoadTestError::Transport(e) if e.is_connect() => {
                "Could not connect to the target host".to_string()
            }
            LoadTestError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            LoadTestError::MissingConfigError { field } => {
                format!("Missing setting '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadTestError>;

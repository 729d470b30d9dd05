use crate::utils::error::{LoadTestError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LoadTestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LoadTestError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LoadTestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(LoadTestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(LoadTestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 檢查 `[low, high]` 區間：下限不得大於上限
pub fn validate_bounds<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    low: T,
    high: T,
) -> Result<()> {
    if low > high {
        return Err(LoadTestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("[{}, {}]", low, high),
            reason: "Lower bound must not exceed upper bound".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("host", "https://example.com").is_ok());
        assert!(validate_url("host", "http://127.0.0.1:8000").is_ok());
        assert!(validate_url("host", "").is_err());
        assert!(validate_url("host", "invalid-url").is_err());
        assert!(validate_url("host", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("users", 5, 1).is_ok());
        assert!(validate_positive_number("users", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range_and_bounds() {
        assert!(validate_range("wait_min", 0.1, 0.0, 60.0).is_ok());
        assert!(validate_range("wait_min", -1.0, 0.0, 60.0).is_err());
        assert!(validate_bounds("quantity", 1, 5).is_ok());
        assert!(validate_bounds("quantity", 3, 3).is_ok());
        assert!(validate_bounds("quantity", 6, 5).is_err());
    }
}

//! Logging and metrics configuration.
//!
//! # Environment Variables
//!
//! - `LOG_LEVEL`: default filter level for agrosense targets (default: `info`)
//! - `LOG_FORMAT`: `compact` (default) or `json`
//! - `LOG_DIR`: when set, errors are also written to a daily rolling file there
//! - `METRICS_ENABLED`: `false` or `0` disables Prometheus metrics

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ConfigError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::Invalid {
                key: "LOG_FORMAT",
                value: s.to_string(),
                expected: "compact or json",
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: LogFormat,
    pub log_dir: Option<PathBuf>,
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
            log_dir: None,
            metrics_enabled: true,
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format,
            log_dir: lookup("LOG_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            metrics_enabled: lookup("METRICS_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup_from;

    #[test]
    fn test_defaults() {
        let config = ObservabilityConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ObservabilityConfig::default());
    }

    #[test]
    fn test_metrics_disabled() {
        let config =
            ObservabilityConfig::from_lookup(lookup_from(&[("METRICS_ENABLED", "FALSE")])).unwrap();
        assert!(!config.metrics_enabled);
    }

    #[test]
    fn test_json_format_and_dir() {
        let config = ObservabilityConfig::from_lookup(lookup_from(&[
            ("LOG_FORMAT", "json"),
            ("LOG_DIR", "storage/logs"),
        ]))
        .unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_dir, Some(PathBuf::from("storage/logs")));
    }

    #[test]
    fn test_invalid_format() {
        assert!(ObservabilityConfig::from_lookup(lookup_from(&[("LOG_FORMAT", "xml")])).is_err());
    }
}

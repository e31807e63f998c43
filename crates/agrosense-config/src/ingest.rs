//! Duplicate policy for sensor ingestion.
//!
//! # Environment Variables
//!
//! - `INGEST_DEDUP_POLICY`: `append` (default) or `timestamp`

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// How a write path treats readings that share a timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DedupPolicy {
    /// Every submission is stored; listings keep the full history.
    #[default]
    Append,
    /// At most one stored reading per timestamp; later submissions observe the first.
    UpsertByTimestamp,
}

impl DedupPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            DedupPolicy::Append => "append",
            DedupPolicy::UpsertByTimestamp => "timestamp",
        }
    }
}

impl fmt::Display for DedupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DedupPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(DedupPolicy::Append),
            "timestamp" | "upsert" => Ok(DedupPolicy::UpsertByTimestamp),
            _ => Err(ConfigError::Invalid {
                key: "INGEST_DEDUP_POLICY",
                value: s.to_string(),
                expected: "append or timestamp",
            }),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngestConfig {
    pub dedup_policy: DedupPolicy,
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dedup_policy = match lookup("INGEST_DEDUP_POLICY") {
            Some(value) => value.parse()?,
            None => DedupPolicy::default(),
        };

        Ok(Self { dedup_policy })
    }
}

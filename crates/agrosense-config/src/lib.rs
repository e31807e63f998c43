//! # agrosense Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`database`]: store connection string and pool sizing
//! - [`cors`]: allowed browser origins
//! - [`ingest`]: duplicate policy for sensor ingestion
//! - [`server`]: bind address per service
//! - [`observability`]: log level, format, file output and metrics toggle
//!
//! Every loader has a `from_env` constructor and a `from_lookup` variant that
//! takes any `Fn(&str) -> Option<String>`, so tests never touch the process
//! environment.
//!
//! # Example
//!
//! ```ignore
//! use agrosense_config::{DatabaseConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let database_config = DatabaseConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod ingest;
pub mod jwt;
pub mod observability;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use ingest::{DedupPolicy, IngestConfig};
pub use jwt::{JwtConfig, MAX_ACCESS_TOKEN_EXPIRY};
pub use observability::{LogFormat, ObservabilityConfig};
pub use server::{ServerConfig, Service};

/// Reads an optional numeric variable, falling back to `default` when absent or unparsable.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
pub(crate) fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

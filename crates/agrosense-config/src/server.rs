//! Bind address for each service.
//!
//! # Environment Variables
//!
//! - `HOST`: interface to bind (default: `0.0.0.0`)
//! - `PORT`: overrides the service's default port

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::{ConfigError, parse_or};

/// The independently deployable agrosense services.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Service {
    Auth,
    Sensors,
    Ingest,
    Parcels,
}

impl Service {
    pub const ALL: [Service; 4] = [
        Service::Auth,
        Service::Sensors,
        Service::Ingest,
        Service::Parcels,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Service::Auth => "auth",
            Service::Sensors => "sensors",
            Service::Ingest => "ingest",
            Service::Parcels => "parcels",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Service::Auth => 4001,
            Service::Sensors => 4002,
            Service::Ingest => 4003,
            Service::Parcels => 4004,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Service {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .into_iter()
            .find(|service| service.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::Invalid {
                key: "SERVICE",
                value: s.to_string(),
                expected: "auth, sensors, ingest or parcels",
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env(service: Service) -> Self {
        Self::from_lookup(service, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(service: Service, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", service.default_port()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

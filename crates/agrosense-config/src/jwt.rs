//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC signing secret (required, no default)
//! - `JWT_ACCESS_EXPIRY`: token lifetime in seconds (default: 7200, two hours;
//!   must be between 1 second and 30 days)

use std::env;
use std::fmt;

use crate::{ConfigError, parse_or};

/// Default access token lifetime: two hours.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 2 * 60 * 60;

/// Longest accepted access token lifetime: 30 days.
pub const MAX_ACCESS_TOKEN_EXPIRY: i64 = 30 * 24 * 60 * 60;

const MIN_RECOMMENDED_SECRET_LEN: usize = 32;

#[derive(Clone, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        if secret.len() < MIN_RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                length = secret.len(),
                "JWT_SECRET is shorter than {} bytes",
                MIN_RECOMMENDED_SECRET_LEN
            );
        }

        let access_token_expiry =
            parse_or(&lookup, "JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_TOKEN_EXPIRY);
        if !(1..=MAX_ACCESS_TOKEN_EXPIRY).contains(&access_token_expiry) {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY",
                value: access_token_expiry.to_string(),
                expected: "a lifetime between 1 and 2592000 seconds",
            });
        }

        Ok(Self {
            secret,
            access_token_expiry,
        })
    }
}

// The secret never appears in logs.
impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup_from;

    #[test]
    fn test_missing_secret_is_fatal() {
        let result = JwtConfig::from_lookup(lookup_from(&[]));
        assert_eq!(result, Err(ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_blank_secret_is_fatal() {
        let result = JwtConfig::from_lookup(lookup_from(&[("JWT_SECRET", "   ")]));
        assert_eq!(result, Err(ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_default_expiry_is_two_hours() {
        let config = JwtConfig::from_lookup(lookup_from(&[(
            "JWT_SECRET",
            "a-signing-secret-of-reasonable-length",
        )]))
        .unwrap();
        assert_eq!(config.access_token_expiry, 7200);
    }

    #[test]
    fn test_expiry_override_and_fallback() {
        let config = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s"),
            ("JWT_ACCESS_EXPIRY", "60"),
        ]))
        .unwrap();
        assert_eq!(config.access_token_expiry, 60);

        let config = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s"),
            ("JWT_ACCESS_EXPIRY", "soon"),
        ]))
        .unwrap();
        assert_eq!(config.access_token_expiry, DEFAULT_ACCESS_TOKEN_EXPIRY);
    }

    #[test]
    fn test_non_positive_expiry_is_rejected() {
        for value in ["0", "-60"] {
            let result = JwtConfig::from_lookup(lookup_from(&[
                ("JWT_SECRET", "s"),
                ("JWT_ACCESS_EXPIRY", value),
            ]));
            assert!(matches!(
                result,
                Err(ConfigError::Invalid {
                    key: "JWT_ACCESS_EXPIRY",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_oversized_expiry_is_rejected() {
        let result = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s"),
            ("JWT_ACCESS_EXPIRY", "9223372036854775807"),
        ]));
        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY",
                value: "9223372036854775807".to_string(),
                expected: "a lifetime between 1 and 2592000 seconds",
            })
        );

        let config = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s"),
            ("JWT_ACCESS_EXPIRY", "2592000"),
        ]))
        .unwrap();
        assert_eq!(config.access_token_expiry, MAX_ACCESS_TOKEN_EXPIRY);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new("super-secret-value");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }
}

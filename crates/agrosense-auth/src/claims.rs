//! Token payload and role tags.
//!
//! - [`Claims`]: identity and role carried inside a signed token
//! - [`Role`]: tagged role enumeration with an explicit equality contract

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_ROLE_LEN: usize = 32;

/// Role attached to a user and carried in their tokens.
///
/// Tags are canonical lowercase ASCII (`a-z`, `0-9`, `_`, `-`). Parsing
/// lowercases and trims its input, so `"Admin"` and `"admin"` are the same
/// role, while a misspelled tag such as `"admn"` stays a distinct
/// [`Role::Custom`] that never satisfies an `Admin` requirement.
///
/// Ordering follows declaration order, then tag text for custom roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Admin,
    #[default]
    User,
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleParseError {
    #[error("role must not be empty")]
    Empty,
    #[error("role must be at most {MAX_ROLE_LEN} characters")]
    TooLong,
    #[error("role may only contain lowercase letters, digits, '_' and '-'")]
    InvalidCharacter,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Custom(tag) => tag,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();

        if tag.is_empty() {
            return Err(RoleParseError::Empty);
        }
        if tag.len() > MAX_ROLE_LEN {
            return Err(RoleParseError::TooLong);
        }
        if !tag
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            return Err(RoleParseError::InvalidCharacter);
        }

        Ok(match tag.as_str() {
            "admin" => Role::Admin,
            "user" => Role::User,
            _ => Role::Custom(tag),
        })
    }
}

impl TryFrom<String> for Role {
    type Error = RoleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// Claims embedded in every access token.
///
/// Claims have no storage of their own; they are derived from a user at
/// login and read back only after the token signature has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub role: Role,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    pub fn new(username: &str, role: &Role, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            username: username.to_string(),
            role: role.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

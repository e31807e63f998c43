//! User records and authentication payloads.

use agrosense_auth::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{non_blank, role_tag};

/// A registered user. The password hash never leaves the store layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Registration payload. `role` defaults to `user` when omitted.
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 64, message = "username must be between 1 and 64 characters"),
        custom(function = "non_blank", message = "username must not be blank")
    )]
    pub username: String,
    #[validate(length(min = 1, max = 72, message = "password must be between 1 and 72 characters"))]
    pub password: String,
    #[validate(custom(function = "role_tag"))]
    pub role: Option<String>,
}

impl RegisterRequest {
    /// Role requested at registration, canonicalised.
    ///
    /// Only meaningful after validation has passed.
    pub fn requested_role(&self) -> Role {
        self.role
            .as_deref()
            .and_then(|r| r.parse().ok())
            .unwrap_or_default()
    }
}

// Hand-written so the password is never printed.
impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

/// Identity read back from verified claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub username: String,
    pub role: Role,
}

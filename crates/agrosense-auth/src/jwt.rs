//! Token codec: signing and verification of access tokens.
//!
//! Tokens are compact HS256 JWTs. The signature covers the whole payload, so
//! any mutation of header, claims or signature fails verification.
//! [`verify`] never hands out claims before the signature and expiry checks
//! have both passed.
//!
//! # Example
//!
//! ```ignore
//! use agrosense_auth::{Role, sign, verify};
//! use chrono::Duration;
//!
//! let token = sign("alice", &Role::Admin, secret, Duration::hours(2))?;
//! let claims = verify(&token, secret)?;
//! assert_eq!(claims.username, "alice");
//! ```

use agrosense_config::{JwtConfig, MAX_ACCESS_TOKEN_EXPIRY};
use agrosense_core::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::claims::{Claims, Role};

/// Why a token could not be issued or accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token")]
    Malformed,

    #[error("Failed to create token: {0}")]
    Encoding(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encoding(_) => AppError::internal(err),
            TokenError::Expired => AppError::unauthenticated("Token expired"),
            TokenError::InvalidSignature | TokenError::Malformed => {
                AppError::unauthenticated("Invalid token")
            }
        }
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expired means `now > exp`, with no grace period.
    validation.leeway = 0;
    validation.validate_exp = true;
    validation
}

/// Signs a prepared set of claims.
///
/// # Errors
///
/// Returns [`TokenError::Encoding`] if the claims cannot be serialized.
pub fn sign_claims(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Issues a token for `username` with `role`, valid from now for `ttl`.
///
/// # Arguments
///
/// * `username` - Identity carried in the token
/// * `role` - Role carried in the token
/// * `secret` - Process-wide signing secret
/// * `ttl` - Token lifetime; `exp = now + ttl`
pub fn sign(username: &str, role: &Role, secret: &str, ttl: Duration) -> Result<String, TokenError> {
    let claims = Claims::new(username, role, Utc::now(), ttl);
    sign_claims(&claims, secret)
}

/// Verifies a token and returns its claims.
///
/// # Errors
///
/// - [`TokenError::InvalidSignature`] if the token was not signed with `secret`
///   or any byte was altered
/// - [`TokenError::Expired`] if `now > exp`
/// - [`TokenError::Malformed`] for anything that is not a well-formed HS256 token
pub fn verify(token: &str, secret: &str) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })
}

/// Creates an access token using the configured secret and lifetime.
///
/// A lifetime outside `1..=MAX_ACCESS_TOKEN_EXPIRY` seconds is an
/// [`TokenError::Encoding`] failure rather than a token that is already
/// expired.
///
/// # Example
///
/// ```ignore
/// let token = create_access_token("alice", &Role::Admin, &jwt_config)?;
/// ```
pub fn create_access_token(
    username: &str,
    role: &Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let ttl = Some(jwt_config.access_token_expiry)
        .filter(|secs| (1..=MAX_ACCESS_TOKEN_EXPIRY).contains(secs))
        .and_then(Duration::try_seconds)
        .ok_or_else(|| {
            TokenError::Encoding(format!(
                "access token lifetime {}s is out of range",
                jwt_config.access_token_expiry
            ))
        })?;

    sign(username, role, &jwt_config.secret, ttl).map_err(AppError::from)
}

/// Verifies an access token against the configured secret.
///
/// # Errors
///
/// Returns an unauthenticated [`AppError`] if the token is invalid or expired.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    verify(token, &jwt_config.secret).map_err(AppError::from)
}

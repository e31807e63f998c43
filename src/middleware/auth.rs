use std::sync::Arc;

use agrosense_auth::{Claims, Role, verify_token};
use agrosense_config::JwtConfig;
use agrosense_core::AppError;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

/// Pulls the bearer credential out of the `Authorization` header.
///
/// # Errors
///
/// Returns an unauthenticated [`AppError`] when the header is absent or is not
/// a `Bearer` credential.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    if !headers.contains_key(header::AUTHORIZATION) {
        return Err(AppError::unauthenticated("Missing authorization header"));
    }

    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
        .ok_or_else(|| AppError::unauthenticated("Invalid authorization header format"))
}

/// Verified claims of the caller.
///
/// Behind a Role Guard the claims are taken from the request extensions.
/// Anywhere else the bearer token is verified on the spot.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn role(&self) -> &Role {
        &self.0.role
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<JwtConfig>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(AuthUser(claims.clone()));
        }

        let jwt_config = Arc::<JwtConfig>::from_ref(state);
        let token = bearer_token(&parts.headers)?;
        let claims = verify_token(&token, &jwt_config)?;

        Ok(AuthUser(claims))
    }
}

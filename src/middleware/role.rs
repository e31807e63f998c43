//! Role Guard: verifies the bearer token and enforces a role before a handler runs.
//!
//! Every guarded route states its requirement explicitly. There is no default
//! that quietly means "any role": a route either asks for
//! [`RoleGuard::require_authenticated`] or for [`RoleGuard::require_role`].
//!
//! The guard has no side effects besides accepting or rejecting the request.
//! On success the verified [`Claims`] are inserted into the request extensions,
//! where [`AuthUser`](crate::middleware::auth::AuthUser) picks them up.

use std::sync::Arc;

use agrosense_auth::{Claims, Role, verify_token};
use agrosense_config::JwtConfig;
use agrosense_core::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::metrics::track_authorization_check;
use crate::middleware::auth::bearer_token;

/// What a route demands of the caller's role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Any caller holding a valid token.
    Any,
    /// Callers whose role equals this one.
    Exactly(Role),
}

impl RoleRequirement {
    pub fn is_satisfied_by(&self, role: &Role) -> bool {
        match self {
            RoleRequirement::Any => true,
            RoleRequirement::Exactly(required) => required == role,
        }
    }
}

/// Checks already-verified claims against a requirement.
///
/// # Example
///
/// ```rust,ignore
/// check_role(&auth_user.0, &RoleRequirement::Exactly(Role::Admin))?;
/// ```
pub fn check_role(claims: &Claims, requirement: &RoleRequirement) -> Result<(), AppError> {
    if requirement.is_satisfied_by(&claims.role) {
        return Ok(());
    }

    Err(AppError::forbidden(match requirement {
        RoleRequirement::Exactly(required) => format!(
            "Access denied. Required role: {}, but user has role: {}",
            required, claims.role
        ),
        RoleRequirement::Any => "Access denied".to_string(),
    }))
}

/// Middleware state: the verification key plus the route's requirement.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    jwt_config: Arc<JwtConfig>,
    requirement: RoleRequirement,
}

impl RoleGuard {
    pub fn new(jwt_config: Arc<JwtConfig>, requirement: RoleRequirement) -> Self {
        Self {
            jwt_config,
            requirement,
        }
    }

    pub fn require_authenticated(jwt_config: Arc<JwtConfig>) -> Self {
        Self::new(jwt_config, RoleRequirement::Any)
    }

    pub fn require_role(jwt_config: Arc<JwtConfig>, role: Role) -> Self {
        Self::new(jwt_config, RoleRequirement::Exactly(role))
    }

    pub fn requirement(&self) -> &RoleRequirement {
        &self.requirement
    }

    /// Runs the full check against request headers.
    ///
    /// # Errors
    ///
    /// - unauthenticated if the bearer credential is missing, malformed,
    ///   tampered with or expired
    /// - forbidden if the verified role does not satisfy the requirement
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Claims, AppError> {
        let token = bearer_token(headers)?;
        // Claims are only read after verify_token has checked signature and expiry.
        let claims = verify_token(&token, &self.jwt_config)?;

        let allowed = self.requirement.is_satisfied_by(&claims.role);
        track_authorization_check(allowed, claims.role.as_str());
        check_role(&claims, &self.requirement)?;

        Ok(claims)
    }
}

/// Middleware entry point, used with `axum::middleware::from_fn_with_state`.
///
/// ```rust,ignore
/// Router::new()
///     .route("/profile", get(profile))
///     .route_layer(middleware::from_fn_with_state(
///         RoleGuard::require_authenticated(jwt_config),
///         role_guard,
///     ));
/// ```
pub async fn role_guard(
    State(guard): State<RoleGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = guard.authorize(req.headers())?;

    tracing::debug!(username = %claims.username, role = %claims.role, "Request authorized");
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrosense_auth::{create_access_token, sign};
    use agrosense_core::ErrorKind;
    use axum::http::{HeaderValue, header};
    use chrono::Duration;

    const SECRET: &str = "test-secret-key-at-least-32-characters-long";

    fn jwt_config() -> Arc<JwtConfig> {
        Arc::new(JwtConfig::new(SECRET))
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_requirement_matching() {
        assert!(RoleRequirement::Any.is_satisfied_by(&Role::User));
        assert!(RoleRequirement::Exactly(Role::Admin).is_satisfied_by(&Role::Admin));
        assert!(!RoleRequirement::Exactly(Role::Admin).is_satisfied_by(&Role::User));

        let custom: Role = "agronomist".parse().unwrap();
        assert!(RoleRequirement::Exactly(custom.clone()).is_satisfied_by(&custom));
        assert!(!RoleRequirement::Exactly(custom).is_satisfied_by(&Role::Admin));
    }

    #[test]
    fn test_authenticated_accepts_any_role() {
        let config = jwt_config();
        let token = create_access_token("bob", &Role::User, &config).unwrap();
        let claims = RoleGuard::require_authenticated(config)
            .authorize(&bearer(&token))
            .unwrap();
        assert_eq!(claims.username, "bob");
    }

    #[test]
    fn test_exact_role_forbids_others() {
        let config = jwt_config();
        let token = create_access_token("bob", &Role::User, &config).unwrap();
        let err = RoleGuard::require_role(config, Role::Admin)
            .authorize(&bearer(&token))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_exact_role_admits_match() {
        let config = jwt_config();
        let token = create_access_token("alice", &Role::Admin, &config).unwrap();
        let claims = RoleGuard::require_role(config, Role::Admin)
            .authorize(&bearer(&token))
            .unwrap();
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn test_expired_token_is_unauthenticated() {
        let token = sign("alice", &Role::Admin, SECRET, Duration::seconds(-10)).unwrap();
        let err = RoleGuard::require_role(jwt_config(), Role::Admin)
            .authorize(&bearer(&token))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_missing_header_is_unauthenticated() {
        let err = RoleGuard::require_authenticated(jwt_config())
            .authorize(&HeaderMap::new())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_foreign_secret_is_unauthenticated() {
        let token = sign(
            "alice",
            &Role::Admin,
            "another-secret-key-at-least-32-characters",
            Duration::hours(2),
        )
        .unwrap();
        let err = RoleGuard::require_role(jwt_config(), Role::Admin)
            .authorize(&bearer(&token))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }
}

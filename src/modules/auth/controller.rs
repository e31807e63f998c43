use agrosense_config::Service;
use agrosense_core::AppError;
use agrosense_db::UserStore;
use agrosense_models::{
    HealthResponse, LoginRequest, LoginResponse, ProfileResponse, RegisterRequest,
    RegisterResponse, User,
};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::modules::health::health_report;
use crate::state::AuthState;
use crate::validator::ValidatedJson;

/// Register a new user
#[instrument(skip(state))]
pub async fn register_user(
    State(state): State<AuthState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let user = AuthService::register(state.users.as_ref(), dto).await?;
    Ok(Json(RegisterResponse {
        message: "User registered".to_string(),
        user,
    }))
}

/// Login and receive an access token
#[instrument(skip(state))]
pub async fn login_user(
    State(state): State<AuthState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(state.users.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Identity of the caller, read from verified claims
pub async fn get_profile(auth_user: AuthUser) -> Json<ProfileResponse> {
    Json(AuthService::profile(&auth_user.0))
}

/// List all users (admin only)
#[instrument(skip(state, auth_user), fields(requested_by = %auth_user.username()))]
pub async fn list_users(
    State(state): State<AuthState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    let users = AuthService::list_users(state.users.as_ref()).await?;
    Ok(Json(users))
}

pub async fn health(State(state): State<AuthState>) -> (StatusCode, Json<HealthResponse>) {
    health_report(Service::Auth, state.users.ping().await)
}

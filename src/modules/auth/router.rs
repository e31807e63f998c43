use std::sync::Arc;

use agrosense_auth::Role;
use agrosense_config::JwtConfig;
use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{get_profile, health, list_users, login_user, register_user};
use crate::middleware::role::{RoleGuard, role_guard};
use crate::state::AuthState;

pub fn init_auth_router(jwt_config: Arc<JwtConfig>) -> Router<AuthState> {
    let authenticated = Router::new()
        .route("/profile", get(get_profile))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::require_authenticated(jwt_config.clone()),
            role_guard,
        ));

    let admin_only = Router::new()
        .route("/users", get(list_users))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::require_role(jwt_config, Role::Admin),
            role_guard,
        ));

    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/health", get(health))
        .merge(authenticated)
        .merge(admin_only)
}

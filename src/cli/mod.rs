//! Administrative commands behind `agrosense-cli`.

use agrosense_auth::Role;
use agrosense_core::AppError;
use agrosense_db::{MIGRATOR, PgPool, UserStore};
use agrosense_models::{RegisterRequest, User};
use anyhow::anyhow;
use validator::Validate;

use crate::modules::auth::service::AuthService;

/// Applies pending schema migrations.
pub async fn run_migrations(db: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(db).await
}

/// Creates a user with the same rules as `POST /register`.
pub async fn create_user(
    users: &dyn UserStore,
    username: &str,
    password: &str,
    role: &Role,
) -> Result<User, AppError> {
    let dto = RegisterRequest {
        username: username.to_string(),
        password: password.to_string(),
        role: Some(role.as_str().to_string()),
    };
    dto.validate()
        .map_err(|errors| AppError::validation(anyhow!("{}", errors)))?;

    AuthService::register(users, dto).await
}

use agrosense_auth::{Claims, create_access_token};
use agrosense_config::JwtConfig;
use agrosense_core::{AppError, hash_password, verify_password};
use agrosense_db::{NewUser, StoreError, UserStore};
use agrosense_models::{LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, User};
use anyhow::anyhow;
use tracing::{info, instrument};

use crate::metrics::{
    track_jwt_issued, track_user_login_failure, track_user_login_success, track_user_registered,
};

pub const TOKEN_TYPE: &str = "Bearer";

pub struct AuthService;

impl AuthService {
    /// Creates a user with a bcrypt-hashed password.
    ///
    /// The uniqueness check and the insert are one store operation, so two
    /// concurrent registrations of the same username cannot both succeed.
    #[instrument(skip(users, dto), fields(username = %dto.username))]
    pub async fn register(users: &dyn UserStore, dto: RegisterRequest) -> Result<User, AppError> {
        let role = dto.requested_role();
        let password_hash = hash_password(&dto.password)?;

        let user = users
            .insert(NewUser {
                username: dto.username,
                password_hash,
                role,
            })
            .await
            .map_err(|err| match err {
                StoreError::Conflict(_) => AppError::conflict(anyhow!("Username already exists")),
                other => other.into(),
            })?;

        track_user_registered(user.role.as_str());
        info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(user)
    }

    /// Checks credentials and issues an access token.
    ///
    /// An unknown username is `not_found`; a wrong password is `unauthorized`.
    #[instrument(skip(users, dto, jwt_config), fields(username = %dto.username))]
    pub async fn login(
        users: &dyn UserStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(credentials) = users.find_by_username(&dto.username).await? else {
            track_user_login_failure("unknown_user");
            return Err(AppError::not_found(anyhow!("User not found")));
        };

        if !verify_password(&dto.password, &credentials.password_hash)? {
            track_user_login_failure("invalid_password");
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let user = credentials.user;
        let token = create_access_token(&user.username, &user.role, jwt_config)?;

        track_jwt_issued();
        track_user_login_success(user.role.as_str());
        info!(role = %user.role, "User logged in");

        Ok(LoginResponse {
            token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: jwt_config.access_token_expiry,
        })
    }

    pub fn profile(claims: &Claims) -> ProfileResponse {
        ProfileResponse {
            username: claims.username.clone(),
            role: claims.role.clone(),
        }
    }

    #[instrument(skip(users))]
    pub async fn list_users(users: &dyn UserStore) -> Result<Vec<User>, AppError> {
        Ok(users.list().await?)
    }
}

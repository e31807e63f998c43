//! Credential store.

use agrosense_auth::Role;
use agrosense_models::User;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::StoreError;

/// A user about to be persisted. Only the hash is ever stored.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// A user together with the stored password hash, for login checks only.
#[derive(Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a user. Fails with [`StoreError::Conflict`] when the username is taken.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_by_username(&self, username: &str)
    -> Result<Option<UserCredentials>, StoreError>;

    /// All users ordered by username.
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    role: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| StoreError::Corrupt(format!("user {} has role {:?}: {}", row.id, row.role, e)))?;

        Ok(User {
            id: row.id,
            username: row.username,
            role,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct CredentialsRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        // The unique index on username arbitrates concurrent registrations.
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (username, password_hash, role)
             VALUES ($1, $2, $3)
             ON CONFLICT (username) DO NOTHING
             RETURNING id, username, role, created_at",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| StoreError::Conflict(format!("username {}", user.username)))?;

        row.try_into()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, StoreError> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            "SELECT id, username, role, created_at, password_hash
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        match row {
            Some(row) => Ok(Some(UserCredentials {
                user: row.user.try_into()?,
                password_hash: row.password_hash,
            })),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, username, role, created_at FROM users ORDER BY username COLLATE \"C\"",
        )
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(User::try_from)
        .collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::ping(&self.db).await
    }
}

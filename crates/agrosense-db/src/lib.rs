//! # agrosense DB
//!
//! Store contracts and their PostgreSQL implementations.
//!
//! Each service owns one [`PgPool`], created at startup by [`init_db_pool`]
//! and handed to the stores it needs. Stores perform exactly one atomic
//! statement per operation; nothing here retries.
//!
//! - [`users`]: [`UserStore`] for credentials
//! - [`readings`]: [`ReadingStore`] with append and insert-if-absent writes
//! - [`parcels`]: [`ParcelStore`] with one-way soft delete
//! - `memory`: in-memory stores with the same contracts (feature `test-utils`)
//!
//! # Example
//!
//! ```ignore
//! use agrosense_config::DatabaseConfig;
//! use agrosense_db::{PgParcelStore, init_db_pool};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! let parcels = PgParcelStore::new(pool.clone());
//! ```

use agrosense_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod parcels;
pub mod readings;
pub mod users;

pub use error::StoreError;
pub use parcels::{DeleteOutcome, NewParcel, ParcelStore, PgParcelStore};
pub use readings::{InsertOutcome, PgReadingStore, ReadingStore};
pub use users::{NewUser, PgUserStore, UserCredentials, UserStore};

pub use sqlx::PgPool;

/// Schema migrations, embedded at compile time.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Opens the connection pool for one service.
///
/// # Errors
///
/// Returns the connection error if the store cannot be reached at startup.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Round-trips a trivial query; used by health checks.
pub async fn ping(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

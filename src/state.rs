//! Per-service application state.
//!
//! Each service gets its own state holding only the stores it uses. Stores are
//! trait objects so the same routers run over PostgreSQL in production and the
//! in-memory stores in tests.

use std::sync::Arc;

use agrosense_config::{DedupPolicy, JwtConfig};
use agrosense_db::{ParcelStore, PgParcelStore, PgPool, PgReadingStore, PgUserStore, UserStore};
use axum::extract::FromRef;

use crate::modules::readings::service::IngestGuard;

#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<dyn UserStore>,
    pub jwt_config: Arc<JwtConfig>,
}

impl AuthState {
    pub fn new(users: Arc<dyn UserStore>, jwt_config: JwtConfig) -> Self {
        Self {
            users,
            jwt_config: Arc::new(jwt_config),
        }
    }

    pub fn from_pool(db: PgPool, jwt_config: JwtConfig) -> Self {
        Self::new(Arc::new(PgUserStore::new(db)), jwt_config)
    }
}

impl FromRef<AuthState> for Arc<JwtConfig> {
    fn from_ref(state: &AuthState) -> Self {
        state.jwt_config.clone()
    }
}

/// State shared by the two reading services; they differ only in dedup policy.
#[derive(Clone)]
pub struct ReadingsState {
    pub guard: IngestGuard,
}

impl ReadingsState {
    pub fn new(guard: IngestGuard) -> Self {
        Self { guard }
    }

    pub fn from_pool(db: PgPool, policy: DedupPolicy) -> Self {
        Self::new(IngestGuard::new(Arc::new(PgReadingStore::new(db)), policy))
    }
}

#[derive(Clone)]
pub struct ParcelsState {
    pub parcels: Arc<dyn ParcelStore>,
}

impl ParcelsState {
    pub fn new(parcels: Arc<dyn ParcelStore>) -> Self {
        Self { parcels }
    }

    pub fn from_pool(db: PgPool) -> Self {
        Self::new(Arc::new(PgParcelStore::new(db)))
    }
}

//! Parcel store with one-way soft delete.

use agrosense_models::Parcel;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct NewParcel {
    pub id: Uuid,
    pub name: String,
    pub location: String,
}

/// Result of a soft delete on an existing parcel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// This call moved the parcel from active to deleted.
    Deleted(Parcel),
    /// The parcel was already deleted; it is returned unchanged.
    AlreadyDeleted(Parcel),
}

impl DeleteOutcome {
    pub fn parcel(&self) -> &Parcel {
        match self {
            DeleteOutcome::Deleted(parcel) | DeleteOutcome::AlreadyDeleted(parcel) => parcel,
        }
    }

    pub fn into_parcel(self) -> Parcel {
        match self {
            DeleteOutcome::Deleted(parcel) | DeleteOutcome::AlreadyDeleted(parcel) => parcel,
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted(_))
    }
}

#[async_trait]
pub trait ParcelStore: Send + Sync {
    /// Stores an active parcel. Fails with [`StoreError::Conflict`] on a duplicate id.
    async fn insert(&self, parcel: NewParcel) -> Result<Parcel, StoreError>;

    /// Sets `deleted = true` and reports whether this call made the transition.
    /// Returns `None` if the id is unknown.
    async fn mark_deleted(&self, id: Uuid) -> Result<Option<DeleteOutcome>, StoreError>;

    /// Parcels whose `deleted` flag equals `deleted`, by name then creation order.
    async fn list(&self, deleted: bool) -> Result<Vec<Parcel>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(FromRow)]
struct MarkDeletedRow {
    #[sqlx(flatten)]
    parcel: Parcel,
    was_deleted: bool,
}

#[derive(Clone, Debug)]
pub struct PgParcelStore {
    db: PgPool,
}

impl PgParcelStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ParcelStore for PgParcelStore {
    async fn insert(&self, parcel: NewParcel) -> Result<Parcel, StoreError> {
        let parcel = sqlx::query_as::<_, Parcel>(
            "INSERT INTO parcels (id, name, location)
             VALUES ($1, $2, $3)
             RETURNING id, name, location, deleted, created_at",
        )
        .bind(parcel.id)
        .bind(&parcel.name)
        .bind(&parcel.location)
        .fetch_one(&self.db)
        .await?;

        Ok(parcel)
    }

    async fn mark_deleted(&self, id: Uuid) -> Result<Option<DeleteOutcome>, StoreError> {
        // The locked prior row tells a fresh transition from a repeat delete,
        // including when two deletes of the same id race.
        let row = sqlx::query_as::<_, MarkDeletedRow>(
            "WITH prior AS (
                 SELECT id, deleted FROM parcels WHERE id = $1 FOR UPDATE
             )
             UPDATE parcels p SET deleted = true
             FROM prior
             WHERE p.id = prior.id
             RETURNING p.id, p.name, p.location, p.deleted, p.created_at,
                       prior.deleted AS was_deleted",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(|row| {
            if row.was_deleted {
                DeleteOutcome::AlreadyDeleted(row.parcel)
            } else {
                DeleteOutcome::Deleted(row.parcel)
            }
        }))
    }

    async fn list(&self, deleted: bool) -> Result<Vec<Parcel>, StoreError> {
        let parcels = sqlx::query_as::<_, Parcel>(
            "SELECT id, name, location, deleted, created_at
             FROM parcels
             WHERE deleted = $1
             ORDER BY name COLLATE \"C\" ASC, seq ASC",
        )
        .bind(deleted)
        .fetch_all(&self.db)
        .await?;

        Ok(parcels)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::ping(&self.db).await
    }
}

use agrosense_core::AppError;
use agrosense_db::{DeleteOutcome, NewParcel, ParcelStore, StoreError};
use agrosense_models::{CreateParcelDto, Parcel};
use anyhow::anyhow;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::metrics::{track_parcel_created, track_parcel_deleted};

/// Which side of the `deleted` partition to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParcelListing {
    Active,
    Deleted,
}

impl ParcelListing {
    fn deleted_flag(self) -> bool {
        matches!(self, ParcelListing::Deleted)
    }
}

pub struct ParcelService;

impl ParcelService {
    #[instrument(skip(parcels))]
    pub async fn create(parcels: &dyn ParcelStore, dto: CreateParcelDto) -> Result<Parcel, AppError> {
        let id = dto.id.unwrap_or_else(Uuid::new_v4);

        let parcel = parcels
            .insert(NewParcel {
                id,
                name: dto.name,
                location: dto.location,
            })
            .await
            .map_err(|err| match err {
                StoreError::Conflict(_) => {
                    AppError::conflict(anyhow!("Parcel {} already exists", id))
                }
                other => other.into(),
            })?;

        track_parcel_created();
        info!(parcel_id = %parcel.id, "Parcel created");

        Ok(parcel)
    }

    /// Marks the parcel deleted.
    ///
    /// Deleting an already-deleted parcel succeeds and returns it unchanged;
    /// only the first call counts as a deletion. Only an id the store has
    /// never seen is `not_found`.
    #[instrument(skip(parcels))]
    pub async fn delete(parcels: &dyn ParcelStore, id: Uuid) -> Result<DeleteOutcome, AppError> {
        let outcome = parcels
            .mark_deleted(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Parcel not found")))?;

        if outcome.is_transition() {
            track_parcel_deleted();
            info!(parcel_id = %id, "Parcel marked deleted");
        } else {
            debug!(parcel_id = %id, "Parcel already deleted");
        }

        Ok(outcome)
    }

    /// One side of the partition, ordered by name then creation order.
    pub async fn list(
        parcels: &dyn ParcelStore,
        listing: ParcelListing,
    ) -> Result<Vec<Parcel>, AppError> {
        Ok(parcels.list(listing.deleted_flag()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrosense_core::ErrorKind;
    use agrosense_db::memory::MemoryParcelStore;
    use std::collections::HashSet;

    fn dto(name: &str) -> CreateParcelDto {
        CreateParcelDto {
            id: None,
            name: name.to_string(),
            location: "X".to_string(),
        }
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryParcelStore::new();
        let parcel = ParcelService::create(&store, dto("North")).await.unwrap();
        assert!(!parcel.deleted);

        let first = ParcelService::delete(&store, parcel.id).await.unwrap();
        let second = ParcelService::delete(&store, parcel.id).await.unwrap();
        assert!(first.parcel().deleted);
        assert_eq!(first.parcel(), second.parcel());
    }

    #[tokio::test]
    async fn test_only_first_delete_is_a_transition() {
        let store = MemoryParcelStore::new();
        let parcel = ParcelService::create(&store, dto("South")).await.unwrap();

        let first = ParcelService::delete(&store, parcel.id).await.unwrap();
        assert!(matches!(first, DeleteOutcome::Deleted(_)));

        for _ in 0..2 {
            let again = ParcelService::delete(&store, parcel.id).await.unwrap();
            assert!(matches!(again, DeleteOutcome::AlreadyDeleted(_)));
        }
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found_every_time() {
        let store = MemoryParcelStore::new();
        let id = Uuid::new_v4();
        for _ in 0..2 {
            let err = ParcelService::delete(&store, id).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::NotFound);
        }
    }

    #[tokio::test]
    async fn test_partition_is_complete_and_disjoint() {
        let store = MemoryParcelStore::new();
        let mut created = HashSet::new();
        for (i, name) in ["Delta", "alpha", "Bravo", "Charlie", "Bravo"].iter().enumerate() {
            let parcel = ParcelService::create(&store, dto(name)).await.unwrap();
            if i % 2 == 0 {
                ParcelService::delete(&store, parcel.id).await.unwrap();
            }
            created.insert(parcel.id);
        }

        let active = ParcelService::list(&store, ParcelListing::Active).await.unwrap();
        let deleted = ParcelService::list(&store, ParcelListing::Deleted).await.unwrap();

        assert!(active.iter().all(|p| !p.deleted));
        assert!(deleted.iter().all(|p| p.deleted));

        let active_ids: HashSet<Uuid> = active.iter().map(|p| p.id).collect();
        let deleted_ids: HashSet<Uuid> = deleted.iter().map(|p| p.id).collect();
        assert!(active_ids.is_disjoint(&deleted_ids));
        assert_eq!(&active_ids | &deleted_ids, created);
    }

    #[tokio::test]
    async fn test_listing_orders_by_name_then_creation() {
        let store = MemoryParcelStore::new();
        let first_bravo = ParcelService::create(&store, dto("Bravo")).await.unwrap();
        ParcelService::create(&store, dto("Alpha")).await.unwrap();
        let second_bravo = ParcelService::create(&store, dto("Bravo")).await.unwrap();

        let active = ParcelService::list(&store, ParcelListing::Active).await.unwrap();
        let names: Vec<&str> = active.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "Bravo"]);
        assert_eq!(active[1].id, first_bravo.id);
        assert_eq!(active[2].id, second_bravo.id);
    }

    #[tokio::test]
    async fn test_duplicate_caller_id_is_conflict() {
        let store = MemoryParcelStore::new();
        let id = Uuid::new_v4();
        let with_id = CreateParcelDto {
            id: Some(id),
            ..dto("North")
        };

        let parcel = ParcelService::create(&store, with_id.clone()).await.unwrap();
        assert_eq!(parcel.id, id);

        let err = ParcelService::create(&store, with_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }
}

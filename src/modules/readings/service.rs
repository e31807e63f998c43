use std::sync::Arc;

use agrosense_config::DedupPolicy;
use agrosense_core::AppError;
use agrosense_db::{InsertOutcome, ReadingStore, StoreError};
use agrosense_models::{NewSensorReading, SensorReading};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::metrics::track_reading_ingested;

/// Writes readings under a caller-chosen duplicate policy.
///
/// Deduplication is delegated to the store's atomic insert-if-absent, so it
/// holds across any number of service instances. Store failures are returned
/// as `storage_unavailable` and never retried here.
#[derive(Clone)]
pub struct IngestGuard {
    store: Arc<dyn ReadingStore>,
    policy: DedupPolicy,
}

impl IngestGuard {
    pub fn new(store: Arc<dyn ReadingStore>, policy: DedupPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> DedupPolicy {
        self.policy
    }

    /// Stores `reading` according to the configured policy.
    pub async fn submit(&self, reading: &NewSensorReading) -> Result<InsertOutcome, AppError> {
        match self.policy {
            DedupPolicy::Append => self.record(reading).await.map(InsertOutcome::Inserted),
            DedupPolicy::UpsertByTimestamp => self.ingest(reading).await,
        }
    }

    /// At most one stored reading per timestamp. A call that loses the race
    /// gets back the id of the reading already stored.
    #[instrument(skip(self, reading), fields(timestamp = %reading.timestamp))]
    pub async fn ingest(&self, reading: &NewSensorReading) -> Result<InsertOutcome, AppError> {
        let outcome = self.store.insert_if_absent(reading).await?;

        if outcome.is_duplicate() {
            debug!(id = %outcome.id(), "Reading already stored");
            track_reading_ingested("duplicate");
        } else {
            track_reading_ingested("stored");
        }

        Ok(outcome)
    }

    /// Append-only write with no dedup key.
    #[instrument(skip(self, reading), fields(timestamp = %reading.timestamp))]
    pub async fn record(&self, reading: &NewSensorReading) -> Result<Uuid, AppError> {
        let id = self.store.append(reading).await?;
        track_reading_ingested("stored");
        Ok(id)
    }

    /// Every stored reading, newest timestamp first.
    pub async fn list(&self) -> Result<Vec<SensorReading>, AppError> {
        Ok(self.store.list_desc().await?)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}

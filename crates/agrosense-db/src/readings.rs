//! Sensor reading store.
//!
//! Two write modes share one table. [`ReadingStore::append`] always writes a
//! new row. [`ReadingStore::insert_if_absent`] keys the row by its timestamp
//! through a unique `dedup_key` column, so concurrent submissions of the same
//! timestamp resolve inside the database to a single row. Appended rows leave
//! `dedup_key` NULL and never collide with anything.

use agrosense_models::{NewSensorReading, SensorReading};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::StoreError;

/// Result of an insert-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// This call stored the reading.
    Inserted(Uuid),
    /// A reading with the same timestamp was already stored.
    Existing(Uuid),
}

impl InsertOutcome {
    pub fn id(self) -> Uuid {
        match self {
            InsertOutcome::Inserted(id) | InsertOutcome::Existing(id) => id,
        }
    }

    pub fn is_duplicate(self) -> bool {
        matches!(self, InsertOutcome::Existing(_))
    }
}

#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Stores the reading unconditionally.
    async fn append(&self, reading: &NewSensorReading) -> Result<Uuid, StoreError>;

    /// Stores the reading unless one with the same timestamp exists, in a
    /// single atomic operation.
    async fn insert_if_absent(&self, reading: &NewSensorReading)
    -> Result<InsertOutcome, StoreError>;

    /// All readings, newest timestamp first.
    async fn list_desc(&self) -> Result<Vec<SensorReading>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(FromRow)]
struct UpsertRow {
    id: Uuid,
    inserted: bool,
}

#[derive(Clone, Debug)]
pub struct PgReadingStore {
    db: PgPool,
}

impl PgReadingStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    async fn append(&self, reading: &NewSensorReading) -> Result<Uuid, StoreError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO sensor_readings (temperature, humidity, rain, radiation, recorded_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(reading.temperature)
        .bind(reading.humidity)
        .bind(reading.rain)
        .bind(reading.radiation)
        .bind(reading.timestamp)
        .fetch_one(&self.db)
        .await?;

        Ok(id)
    }

    async fn insert_if_absent(
        &self,
        reading: &NewSensorReading,
    ) -> Result<InsertOutcome, StoreError> {
        // DO UPDATE (rather than DO NOTHING) locks and returns the winning row
        // even when it was committed by a concurrent statement; xmax = 0 only
        // holds for a freshly inserted tuple.
        let row = sqlx::query_as::<_, UpsertRow>(
            "INSERT INTO sensor_readings
                 (temperature, humidity, rain, radiation, recorded_at, dedup_key)
             VALUES ($1, $2, $3, $4, $5, $5)
             ON CONFLICT (dedup_key) DO UPDATE SET dedup_key = EXCLUDED.dedup_key
             RETURNING id, (xmax = 0) AS inserted",
        )
        .bind(reading.temperature)
        .bind(reading.humidity)
        .bind(reading.rain)
        .bind(reading.radiation)
        .bind(reading.timestamp)
        .fetch_one(&self.db)
        .await?;

        Ok(if row.inserted {
            InsertOutcome::Inserted(row.id)
        } else {
            InsertOutcome::Existing(row.id)
        })
    }

    async fn list_desc(&self) -> Result<Vec<SensorReading>, StoreError> {
        let readings = sqlx::query_as::<_, SensorReading>(
            r#"SELECT id, temperature, humidity, rain, radiation, recorded_at AS "timestamp"
               FROM sensor_readings
               ORDER BY recorded_at DESC, seq DESC"#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(readings)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::ping(&self.db).await
    }
}

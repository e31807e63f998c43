//! Sensor readings and ingestion payloads.
//!
//! A reading's `timestamp` is its logical dedup key. Timestamps are kept at
//! microsecond precision so the value compared at write time is exactly the
//! value the store holds.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::timestamp_in_range;

/// A stored reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SensorReading {
    pub id: Uuid,
    pub temperature: f64,
    pub humidity: f64,
    pub rain: bool,
    pub radiation: f64,
    pub timestamp: DateTime<Utc>,
}

/// A reading ready to be written; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSensorReading {
    pub temperature: f64,
    pub humidity: f64,
    pub rain: bool,
    pub radiation: f64,
    pub timestamp: DateTime<Utc>,
}

impl NewSensorReading {
    pub fn new(
        temperature: f64,
        humidity: f64,
        rain: bool,
        radiation: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            temperature,
            humidity,
            rain,
            radiation,
            timestamp: timestamp.trunc_subsecs(6),
        }
    }

    pub fn into_stored(self, id: Uuid) -> SensorReading {
        SensorReading {
            id,
            temperature: self.temperature,
            humidity: self.humidity,
            rain: self.rain,
            radiation: self.radiation,
            timestamp: self.timestamp,
        }
    }
}

/// Body of `POST /ingest`. A missing timestamp means "now".
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IngestReadingDto {
    pub temperature: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "humidity must be between 0 and 100"))]
    pub humidity: f64,
    #[serde(alias = "rain_flag")]
    pub rain: bool,
    #[validate(range(min = 0.0, message = "radiation must not be negative"))]
    pub radiation: f64,
    #[validate(custom(
        function = "timestamp_in_range",
        message = "timestamp must be between 1970 and 9999"
    ))]
    pub timestamp: Option<DateTime<Utc>>,
}

impl IngestReadingDto {
    pub fn into_reading(self, now: DateTime<Utc>) -> NewSensorReading {
        NewSensorReading::new(
            self.temperature,
            self.humidity,
            self.rain,
            self.radiation,
            self.timestamp.unwrap_or(now),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    pub status: String,
    pub id: Uuid,
    /// True when the timestamp was already stored and no new record was written.
    pub duplicate: bool,
}

/// Body of `GET /sensor-data`: the generated reading and where it landed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorDataResponse {
    pub status: String,
    pub id: Uuid,
    pub duplicate: bool,
    pub reading: NewSensorReading,
}

use agrosense_config::Service;
use agrosense_core::AppError;
use agrosense_models::{HealthResponse, SensorDataResponse};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use tracing::instrument;

use super::service::simulate_reading;
use crate::modules::health::health_report;
use crate::modules::ingest::controller::{STATUS_DUPLICATE, STATUS_STORED};
use crate::state::ReadingsState;

/// Generate a simulated reading and store it, one record per timestamp
#[instrument(skip(state))]
pub async fn get_sensor_data(
    State(state): State<ReadingsState>,
) -> Result<Json<SensorDataResponse>, AppError> {
    let reading = simulate_reading(&mut rand::thread_rng(), Utc::now());
    let outcome = state.guard.ingest(&reading).await?;

    let status = if outcome.is_duplicate() {
        STATUS_DUPLICATE
    } else {
        STATUS_STORED
    };

    Ok(Json(SensorDataResponse {
        status: status.to_string(),
        id: outcome.id(),
        duplicate: outcome.is_duplicate(),
        reading,
    }))
}

pub async fn health(State(state): State<ReadingsState>) -> (StatusCode, Json<HealthResponse>) {
    health_report(Service::Sensors, state.guard.ping().await)
}

use agrosense_config::Service;
use agrosense_core::AppError;
use agrosense_models::{HealthResponse, IngestReadingDto, IngestResponse};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use tracing::instrument;

use crate::modules::health::health_report;
use crate::state::ReadingsState;
use crate::validator::ValidatedJson;

pub const STATUS_STORED: &str = "stored";
pub const STATUS_DUPLICATE: &str = "duplicate";

/// Store a reading posted by a client
#[instrument(skip(state), fields(policy = %state.guard.policy()))]
pub async fn ingest_reading(
    State(state): State<ReadingsState>,
    ValidatedJson(dto): ValidatedJson<IngestReadingDto>,
) -> Result<Json<IngestResponse>, AppError> {
    let reading = dto.into_reading(Utc::now());
    let outcome = state.guard.submit(&reading).await?;

    let status = if outcome.is_duplicate() {
        STATUS_DUPLICATE
    } else {
        STATUS_STORED
    };

    Ok(Json(IngestResponse {
        status: status.to_string(),
        id: outcome.id(),
        duplicate: outcome.is_duplicate(),
    }))
}

pub async fn health(State(state): State<ReadingsState>) -> (StatusCode, Json<HealthResponse>) {
    health_report(Service::Ingest, state.guard.ping().await)
}

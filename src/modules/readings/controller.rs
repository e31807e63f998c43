use agrosense_core::AppError;
use agrosense_models::SensorReading;
use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::state::ReadingsState;

/// List stored readings, newest first
#[instrument(skip(state))]
pub async fn list_records(
    State(state): State<ReadingsState>,
) -> Result<Json<Vec<SensorReading>>, AppError> {
    let records = state.guard.list().await?;
    Ok(Json(records))
}

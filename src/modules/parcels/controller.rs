use agrosense_config::Service;
use agrosense_core::AppError;
use agrosense_db::ParcelStore;
use agrosense_models::{CreateParcelDto, DeletedParcelResponse, HealthResponse, Parcel};
use anyhow::anyhow;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::service::{ParcelListing, ParcelService};
use crate::modules::health::health_report;
use crate::state::ParcelsState;
use crate::validator::ValidatedJson;

/// Create an active parcel
#[instrument(skip(state))]
pub async fn create_parcel(
    State(state): State<ParcelsState>,
    ValidatedJson(dto): ValidatedJson<CreateParcelDto>,
) -> Result<Json<Parcel>, AppError> {
    let parcel = ParcelService::create(state.parcels.as_ref(), dto).await?;
    Ok(Json(parcel))
}

/// List active parcels by name
#[instrument(skip(state))]
pub async fn list_parcels(State(state): State<ParcelsState>) -> Result<Json<Vec<Parcel>>, AppError> {
    let parcels = ParcelService::list(state.parcels.as_ref(), ParcelListing::Active).await?;
    Ok(Json(parcels))
}

/// Soft-delete a parcel
///
/// An id that is not a UUID cannot name a stored parcel and is reported as not found.
#[instrument(skip(state))]
pub async fn delete_parcel(
    State(state): State<ParcelsState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedParcelResponse>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::not_found(anyhow!("Parcel not found")))?;
    let outcome = ParcelService::delete(state.parcels.as_ref(), id).await?;
    Ok(Json(DeletedParcelResponse {
        deleted: outcome.into_parcel(),
    }))
}

/// List deleted parcels by name
#[instrument(skip(state))]
pub async fn list_deleted_parcels(
    State(state): State<ParcelsState>,
) -> Result<Json<Vec<Parcel>>, AppError> {
    let parcels = ParcelService::list(state.parcels.as_ref(), ParcelListing::Deleted).await?;
    Ok(Json(parcels))
}

pub async fn health(State(state): State<ParcelsState>) -> (StatusCode, Json<HealthResponse>) {
    health_report(Service::Parcels, state.parcels.ping().await)
}

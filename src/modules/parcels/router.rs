use axum::{
    Router,
    routing::{delete, get},
};

use super::controller::{
    create_parcel, delete_parcel, health, list_deleted_parcels, list_parcels,
};
use crate::state::ParcelsState;

pub fn init_parcels_router() -> Router<ParcelsState> {
    Router::new()
        .route("/parcelas", get(list_parcels).post(create_parcel))
        .route("/parcelas/eliminadas", get(list_deleted_parcels))
        .route("/parcelas/{id}", delete(delete_parcel))
        .route("/health", get(health))
}

use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{health, ingest_reading};
use crate::modules::readings::controller::list_records;
use crate::state::ReadingsState;

pub fn init_ingest_router() -> Router<ReadingsState> {
    Router::new()
        .route("/ingest", post(ingest_reading))
        .route("/records", get(list_records))
        .route("/health", get(health))
}

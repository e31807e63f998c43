use axum::{Router, routing::get};

use super::controller::{get_sensor_data, health};
use crate::modules::readings::controller::list_records;
use crate::state::ReadingsState;

pub fn init_sensors_router() -> Router<ReadingsState> {
    Router::new()
        .route("/sensor-data", get(get_sensor_data))
        .route("/records", get(list_records))
        .route("/health", get(health))
}

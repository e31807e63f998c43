//! Health reports shared by every service.

use agrosense_config::Service;
use agrosense_db::StoreError;
use agrosense_models::HealthResponse;
use axum::{Json, http::StatusCode};

/// Turns a store ping into a `/health` response: 200 when the store answers,
/// 503 otherwise.
pub fn health_report(
    service: Service,
    ping: Result<(), StoreError>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, body_status, store) = match ping {
        Ok(()) => (StatusCode::OK, "ok", "up"),
        Err(err) => {
            tracing::warn!(service = %service, error = %err, "Store health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
        }
    };

    (
        status,
        Json(HealthResponse {
            status: body_status.to_string(),
            service: service.name().to_string(),
            store: store.to_string(),
        }),
    )
}

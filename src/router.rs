use agrosense_config::CorsConfig;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;

use crate::logging::logging_middleware;
use crate::metrics::{metrics_app, metrics_middleware};
use crate::modules::auth::router::init_auth_router;
use crate::modules::ingest::router::init_ingest_router;
use crate::modules::parcels::router::init_parcels_router;
use crate::modules::sensors::router::init_sensors_router;
use crate::state::{AuthState, ParcelsState, ReadingsState};

pub fn cors_layer(cors_config: &CorsConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Layers every service shares: `/metrics`, CORS, metrics and request logging.
fn with_common_layers(
    router: Router,
    cors_config: &CorsConfig,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let router = match metrics_handle {
        Some(handle) => router.merge(metrics_app(handle)),
        None => router,
    };

    router
        .layer(cors_layer(cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

pub fn init_auth_app(
    state: AuthState,
    cors_config: &CorsConfig,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let router = init_auth_router(state.jwt_config.clone()).with_state(state);
    with_common_layers(router, cors_config, metrics_handle)
}

pub fn init_sensors_app(
    state: ReadingsState,
    cors_config: &CorsConfig,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let router = init_sensors_router().with_state(state);
    with_common_layers(router, cors_config, metrics_handle)
}

pub fn init_ingest_app(
    state: ReadingsState,
    cors_config: &CorsConfig,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let router = init_ingest_router().with_state(state);
    with_common_layers(router, cors_config, metrics_handle)
}

pub fn init_parcels_app(
    state: ParcelsState,
    cors_config: &CorsConfig,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let router = init_parcels_router().with_state(state);
    with_common_layers(router, cors_config, metrics_handle)
}

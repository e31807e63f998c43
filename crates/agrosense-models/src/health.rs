use serde::{Deserialize, Serialize};

/// Liveness report for a service and its backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub store: String,
}

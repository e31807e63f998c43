//! Parcels and their soft-delete lifecycle payloads.
//!
//! A parcel is created active and can only move to deleted. Deleted parcels
//! stay in the store and are listed separately.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::non_blank;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Parcel {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /parcelas`. The server generates `id` when the caller omits it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateParcelDto {
    pub id: Option<Uuid>,
    #[validate(
        length(min = 1, max = 200, message = "name must be between 1 and 200 characters"),
        custom(function = "non_blank", message = "name must not be blank")
    )]
    pub name: String,
    #[validate(
        length(min = 1, max = 200, message = "location must be between 1 and 200 characters"),
        custom(function = "non_blank", message = "location must not be blank")
    )]
    pub location: String,
}

/// Body of `DELETE /parcelas/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedParcelResponse {
    pub deleted: Parcel,
}

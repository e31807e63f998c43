//! # agrosense Models
//!
//! Domain records and request/response DTOs shared by the agrosense services.
//!
//! # Modules
//!
//! - [`users`]: users, registration and login payloads
//! - [`readings`]: sensor readings and ingestion payloads
//! - [`parcels`]: parcels and their soft-delete lifecycle payloads
//! - [`health`]: service health report

pub mod health;
pub mod parcels;
pub mod readings;
pub mod users;
mod validation;

pub use health::HealthResponse;
pub use parcels::{CreateParcelDto, DeletedParcelResponse, Parcel};
pub use readings::{IngestReadingDto, IngestResponse, NewSensorReading, SensorDataResponse, SensorReading};
pub use users::{
    LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse, User,
};

//! Soft-Delete Lifecycle for parcels.

pub mod controller;
pub mod router;
pub mod service;

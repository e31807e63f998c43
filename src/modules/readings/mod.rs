//! Idempotent Ingest Guard shared by the sensors and ingest services.

pub mod controller;
pub mod service;

pub mod auth;
pub mod health;
pub mod ingest;
pub mod parcels;
pub mod readings;
pub mod sensors;

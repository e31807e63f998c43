//! # agrosense Core
//!
//! Foundational types shared by every agrosense service:
//!
//! - [`errors`]: the [`AppError`] taxonomy and its JSON response form
//! - [`password`]: bcrypt password hashing and verification

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorKind};
pub use password::{hash_password, verify_password};

//! Request-boundary authentication and authorization.
//!
//! - [`auth`]: bearer token extraction and the [`auth::AuthUser`] extractor
//! - [`role`]: the Role Guard middleware
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`role::role_guard`] verifies the token and checks the route's [`role::RoleRequirement`]
//! 3. Verified claims are stored in the request extensions
//! 4. Handlers read them back through [`auth::AuthUser`]
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use crate::middleware::role::{RoleGuard, role_guard};
//!
//! let admin_only = Router::new()
//!     .route("/users", get(list_users))
//!     .route_layer(middleware::from_fn_with_state(
//!         RoleGuard::require_role(jwt_config.clone(), Role::Admin),
//!         role_guard,
//!     ));
//! ```

pub mod auth;
pub mod role;

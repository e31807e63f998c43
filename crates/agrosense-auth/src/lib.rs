//! # agrosense Auth
//!
//! Token issuance and verification shared by every agrosense service.
//!
//! - [`claims`]: the [`Claims`] payload and the [`Role`] tag enumeration
//! - [`jwt`]: the token codec ([`sign`], [`verify`]) and config-driven helpers
//!
//! Tokens are HS256-signed JWTs. A token that verifies was issued with the
//! same secret and has not expired; any byte change breaks the signature.
//!
//! # Example
//!
//! ```ignore
//! use agrosense_auth::{Role, create_access_token, verify_token};
//! use agrosense_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token("alice", &Role::Admin, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, Role::Admin);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, Role, RoleParseError};
pub use jwt::{TokenError, create_access_token, sign, sign_claims, verify, verify_token};

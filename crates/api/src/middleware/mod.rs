//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from HTTP Basic credentials or a Bearer token.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.

pub mod auth;
pub mod rbac;

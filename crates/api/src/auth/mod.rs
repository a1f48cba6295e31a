//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`provider`] -- the pluggable credential check behind HTTP Basic and `/login`.

pub mod jwt;
pub mod password;
pub mod provider;

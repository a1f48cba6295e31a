//! Well-known role name constants.
//!
//! The admin principal holds both roles; the standard principal only `user`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

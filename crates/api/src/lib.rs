//! StaffHub HTTP server library.
//!
//! Exposes configuration, state, error handling, auth and routes so the
//! binary entrypoint and the integration tests share one router.

pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

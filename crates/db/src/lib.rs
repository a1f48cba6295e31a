//! Persistence for employees (PostgreSQL) and projects (MongoDB).
//!
//! Services depend only on the traits in [`store`]; the concrete stores in
//! [`repositories`] and [`memory`] are chosen at startup.

pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use error::StoreError;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the relational store is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded SQL migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Connect to the document store and select the application database.
pub async fn connect_documents(
    uri: &str,
    database: &str,
) -> Result<mongodb::Database, mongodb::error::Error> {
    let client = mongodb::Client::with_uri_str(uri).await?;
    Ok(client.database(database))
}

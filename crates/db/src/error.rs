//! Store failures and their mapping onto domain errors.

use staffhub_core::error::CoreError;

/// Failure raised by a store implementation.
///
/// Absence of a row or document is never an error; lookups return `Option`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("{0}")]
    Duplicate(String),

    /// A compare-and-swap replace found a newer version than the one read.
    #[error("Project {id} was modified concurrently")]
    VersionConflict { id: String },

    #[error("Database error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("Document store error: {0}")]
    Document(#[from] mongodb::error::Error),

    /// A stored document could not be mapped to the domain model.
    #[error("Malformed document: {0}")]
    Malformed(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(msg) => CoreError::Conflict(msg),
            StoreError::VersionConflict { .. } => CoreError::Conflict(err.to_string()),
            other => {
                tracing::error!(error = %other, "Store failure");
                CoreError::Internal(other.to_string())
            }
        }
    }
}

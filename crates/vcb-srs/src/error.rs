use thiserror::Error;

/// Failures reported by a [`crate::ProgressStore`] implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Progress record {0} does not exist")]
    Missing(i64),
    /// A referenced user or item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Progress record already exists for {0}")]
    Conflict(String),
    #[error("Malformed progress record: {0}")]
    InvalidRecord(String),
    #[error("Store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors returned by [`crate::ProgressTracker`] operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

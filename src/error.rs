//! Error types for relation operations.

/// Result type for relation operations
pub type RelationResult<T> = Result<T, RelationError>;

/// Error type for relation operations.
///
/// Soft validation failures (booking conflicts, opening hours) are not errors;
/// they are returned as [`crate::types::ValidationResult`].
#[derive(Debug, thiserror::Error)]
pub enum RelationError {
    /// Caller sequencing is wrong, e.g. saving before the host was persisted
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RelationError {
    /// Storage-class failures bubble up unmodified; everything else is the caller's fault
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            RelationError::Storage(_) | RelationError::Io(_) | RelationError::Json(_)
        )
    }
}

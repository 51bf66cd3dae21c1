//! Domain-level error types.

use thiserror::Error;

use crate::domain::PostId;

/// Domain errors - failures raised by the service and mapper.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Error: Post with ID {{{id}}} not found.")]
    NotFound { id: PostId },

    /// Stored tags could not be encoded or decoded. Indicates corrupt data.
    #[error("Failed to map tags: {0}")]
    Mapping(String),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

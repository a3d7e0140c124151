//! Domain errors for the Prospector pipeline.

use thiserror::Error;

/// Domain-level errors that can occur in the Prospector system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No evaluation rubric for agent: {0}")]
    UnknownAgent(String),

    #[error("Unknown agent kind: {0}")]
    UnknownAgentKind(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

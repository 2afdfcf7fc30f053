//! Domain layer errors.
//!
//! Two families live here: [`DomainError`] for local persistence and
//! validation, and [`FetchError`] for anything that goes wrong talking to the
//! remote catalog. Callers treat every `FetchError` variant the same way:
//! nothing is persisted for that cycle.

use thiserror::Error;

/// Domain layer error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Validation error for entity fields.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Persistence layer error (abstracted).
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Failure of a single remote fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport error or timeout.
    #[error("Network failure: {0}")]
    Network(String),

    /// Malformed or incomplete response body.
    #[error("Parse failure: {0}")]
    Parse(String),

    /// Well-formed error response from the remote service.
    #[error("API failure (code {code}): {message}")]
    Api { code: i64, message: String },
}

impl FetchError {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Parse(_) => "parse",
            FetchError::Api { .. } => "api",
        }
    }
}

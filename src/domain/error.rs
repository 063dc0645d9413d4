//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the node contract.
/// These are independent of I/O and configuration concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("extension field name is reserved: {0}")]
    ReservedField(String),

    #[error("invalid tree document: {message}")]
    InvalidDocument { message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

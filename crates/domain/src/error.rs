//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The response body could not be decoded as JSON.
    #[error("invalid response body: {0}")]
    InvalidBody(String),

    /// A dotted field path is malformed (empty, or has an empty segment).
    #[error("invalid field path: {0:?}")]
    InvalidPath(String),

    /// A settings value is out of range or unrecognised.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

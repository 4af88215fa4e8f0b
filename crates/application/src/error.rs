//! Application error types

use respcheck_domain::DomainError;
use thiserror::Error;

/// Application-level errors.
///
/// These are caller-contract violations. Assertion failures are never errors;
/// they are recorded as failed outcomes.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A required argument was absent or empty.
    #[error("Required property '{argument}' not found in test {check}")]
    MissingArgument {
        /// Name of the missing argument.
        argument: &'static str,
        /// Named check that required it.
        check: &'static str,
    },

    /// An argument had the wrong type.
    #[error("invalid argument '{argument}' for {check}: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// Named check that received it.
        check: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// No check is registered under the given name.
    #[error("unknown check: {0}")]
    UnknownCheck(String),

    /// A storage operation failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ApplicationError {
    /// Shorthand for a `MissingArgument` error.
    #[must_use]
    pub const fn missing(argument: &'static str, check: &'static str) -> Self {
        Self::MissingArgument { argument, check }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

//! Configuration error types.

use std::path::PathBuf;

use respcheck_domain::DomainError;

use crate::serialization::SerializationError;

/// Errors raised while loading settings or suites.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The extension names no supported format.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(PathBuf),

    /// The document could not be parsed.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: SerializationError,
    },

    /// An environment override holds an unusable value.
    #[error("invalid value '{value}' for {variable}")]
    InvalidOverride {
        /// Environment variable name.
        variable: &'static str,
        /// Value it held.
        value: String,
    },

    /// The loaded settings failed validation.
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

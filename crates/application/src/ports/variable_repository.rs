//! Variable repository port
//!
//! Defines the interface for persisting session variables between runs.

use async_trait::async_trait;

use super::variable_store::VariableSnapshot;

/// Errors that can occur while persisting variables.
#[derive(Debug, thiserror::Error)]
pub enum VariableError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The persisted data is not a variable map.
    #[error("Invalid variables: {0}")]
    Invalid(String),
}

/// Repository trait for variable persistence.
#[async_trait]
pub trait VariableRepository: Send + Sync {
    /// Loads the persisted variables.
    ///
    /// Returns an empty snapshot when nothing was persisted yet.
    ///
    /// # Errors
    /// Returns an error if the stored data cannot be read or parsed.
    async fn load(&self) -> Result<VariableSnapshot, VariableError>;

    /// Persists the given variables, replacing what was stored.
    ///
    /// # Errors
    /// Returns an error if the data cannot be written.
    async fn save(&self, variables: &VariableSnapshot) -> Result<(), VariableError>;

    /// Removes everything that was persisted.
    ///
    /// # Errors
    /// Returns an error if the stored data cannot be removed.
    async fn clear(&self) -> Result<(), VariableError> {
        self.save(&VariableSnapshot::new()).await
    }
}

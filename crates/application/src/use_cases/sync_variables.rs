//! Sync variables use case.
//!
//! Moves session variables between the live store and the repository that
//! persists them across runs.

use respcheck_domain::DEFAULT_DESCRIPTION_VARIABLE;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{VariableRepository, VariableStore};

/// Use case for restoring and persisting session variables.
pub struct SyncVariables<R: VariableRepository> {
    repository: R,
    description_variable: String,
}

impl<R: VariableRepository> SyncVariables<R> {
    /// Creates a new `SyncVariables` use case.
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            description_variable: DEFAULT_DESCRIPTION_VARIABLE.to_string(),
        }
    }

    /// Sets the name of the transient description variable, which is never
    /// persisted.
    #[must_use]
    pub fn with_description_variable(mut self, name: impl Into<String>) -> Self {
        self.description_variable = name.into();
        self
    }

    /// Replaces the content of `store` with the persisted variables.
    ///
    /// Returns the number of variables restored.
    ///
    /// # Errors
    /// Returns `ApplicationError::Storage` if the repository cannot be read.
    pub async fn restore(&self, store: &mut dyn VariableStore) -> ApplicationResult<usize> {
        let snapshot = self
            .repository
            .load()
            .await
            .map_err(|e| ApplicationError::Storage(e.to_string()))?;

        let count = snapshot.len();
        store.restore(snapshot);
        tracing::debug!(count, "restored session variables");
        Ok(count)
    }

    /// Persists every variable of `store` except the pending description.
    ///
    /// Returns the number of variables written.
    ///
    /// # Errors
    /// Returns `ApplicationError::Storage` if the repository cannot be written.
    pub async fn persist(&self, store: &dyn VariableStore) -> ApplicationResult<usize> {
        let mut snapshot = store.snapshot();
        snapshot.remove(&self.description_variable);

        self.repository
            .save(&snapshot)
            .await
            .map_err(|e| ApplicationError::Storage(e.to_string()))?;

        tracing::debug!(count = snapshot.len(), "persisted session variables");
        Ok(snapshot.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{VariableError, VariableSnapshot};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryRepository {
        saved: Mutex<VariableSnapshot>,
        fail: bool,
    }

    #[async_trait]
    impl VariableRepository for MemoryRepository {
        async fn load(&self) -> Result<VariableSnapshot, VariableError> {
            if self.fail {
                return Err(VariableError::Invalid("broken".to_string()));
            }
            Ok(self.saved.lock().map(|s| s.clone()).unwrap_or_default())
        }

        async fn save(&self, variables: &VariableSnapshot) -> Result<(), VariableError> {
            if let Ok(mut saved) = self.saved.lock() {
                saved.clone_from(variables);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn persist_skips_pending_description() {
        let use_case = SyncVariables::new(MemoryRepository::default());
        let mut store = VariableSnapshot::new();
        store.set("token", json!("abc"));
        store.set("testDescription", json!("pending"));

        let written = use_case.persist(&store).await.expect("persist");
        assert_eq!(written, 1);

        let mut restored = VariableSnapshot::new();
        restored.set("stale", json!(true));
        let count = use_case.restore(&mut restored).await.expect("restore");

        assert_eq!(count, 1);
        assert_eq!(restored.get("token"), Some(&json!("abc")));
        assert_eq!(restored.get("stale"), None);
    }

    #[tokio::test]
    async fn restore_maps_repository_errors() {
        let use_case = SyncVariables::new(MemoryRepository {
            fail: true,
            ..MemoryRepository::default()
        });
        let mut store = VariableSnapshot::new();

        let result = use_case.restore(&mut store).await;
        assert!(matches!(result, Err(ApplicationError::Storage(_))));
    }
}

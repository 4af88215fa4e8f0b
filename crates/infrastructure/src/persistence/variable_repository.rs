//! File-based variable repository implementation.
//!
//! Session variables are stored as one JSON object per file, keys sorted.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use respcheck_application::ports::{VariableError, VariableRepository, VariableSnapshot};
use serde_json::Value;
use tokio::fs;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Stores session variables in a single JSON file:
/// ```text
/// {
///   "authToken": "abc",
///   "userId": 42
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileVariableRepository {
    path: PathBuf,
}

impl FileVariableRepository {
    /// Creates a repository backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl VariableRepository for FileVariableRepository {
    async fn load(&self) -> Result<VariableSnapshot, VariableError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(VariableSnapshot::new());
            }
            Err(e) => return Err(VariableError::Io(e)),
        };

        let value: Value =
            from_json_bytes(&content).map_err(|e| VariableError::Serialization(e.to_string()))?;

        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(VariableError::Invalid(format!(
                "{} must hold a JSON object, found {other}",
                self.path.display()
            ))),
        }
    }

    async fn save(&self, variables: &VariableSnapshot) -> Result<(), VariableError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = to_json_stable_bytes(variables)
            .map_err(|e| VariableError::Serialization(e.to_string()))?;
        fs::write(&self.path, content).await?;

        tracing::debug!(path = %self.path.display(), count = variables.len(), "variables saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), VariableError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VariableError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let temp = TempDir::new().expect("tempdir");
        let repo = FileVariableRepository::new(temp.path().join("vars.json"));

        let loaded = repo.load().await.expect("load");
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn save_then_load() {
        let temp = TempDir::new().expect("tempdir");
        let repo = FileVariableRepository::new(temp.path().join("session/vars.json"));

        let mut variables = VariableSnapshot::new();
        variables.insert("userId".to_string(), json!(42));
        variables.insert("authToken".to_string(), json!("abc"));
        repo.save(&variables).await.expect("save");

        let written = std::fs::read_to_string(repo.path()).expect("read");
        assert_eq!(written, "{\n  \"authToken\": \"abc\",\n  \"userId\": 42\n}\n");

        let loaded = repo.load().await.expect("load");
        assert_eq!(loaded, variables);
    }

    #[tokio::test]
    async fn non_object_file_is_invalid() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("vars.json");
        std::fs::write(&path, "[1, 2]").expect("write");

        let result = FileVariableRepository::new(path).load().await;
        assert!(matches!(result, Err(VariableError::Invalid(_))));
    }

    #[tokio::test]
    async fn clear_removes_file() {
        let temp = TempDir::new().expect("tempdir");
        let repo = FileVariableRepository::new(temp.path().join("vars.json"));

        let mut variables = VariableSnapshot::new();
        variables.insert("token".to_string(), json!("t"));
        repo.save(&variables).await.expect("save");

        repo.clear().await.expect("clear");
        assert!(!repo.path().exists());
        repo.clear().await.expect("clear twice");
    }
}

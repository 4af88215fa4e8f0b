//! Suite loader.

use std::path::Path;

use respcheck_domain::CheckSuite;
use tokio::fs;

use super::error::ConfigError;
use crate::serialization::DocumentFormat;

/// Loads check suites from YAML or JSON files.
///
/// ```yaml
/// name: create user
/// steps:
///   - check: response_code
///     code: 201
///   - check: is_not_null
///     whitelist: [id, name]
///   - check: compare
///     field: user.age
///     operator: greater_than
///     expected: 18
///     description: adult user
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SuiteLoader;

impl SuiteLoader {
    /// Creates a new suite loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads the suite at `path`. An unnamed suite takes the file stem as
    /// its name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a
    /// suite.
    pub async fn load(&self, path: &Path) -> Result<CheckSuite, ConfigError> {
        let format = DocumentFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

        let content = fs::read(path).await.map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut suite: CheckSuite = format.parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if suite.name.trim().is_empty()
            && let Some(stem) = path.file_stem()
        {
            suite.name = stem.to_string_lossy().into_owned();
        }

        tracing::debug!(suite = %suite.name, steps = suite.len(), "suite loaded");
        Ok(suite)
    }
}

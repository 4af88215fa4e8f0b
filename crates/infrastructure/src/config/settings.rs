//! Settings loader.
//!
//! Reads `CheckSettings` from a YAML or JSON file, then applies environment
//! overrides.

use std::path::Path;

use respcheck_domain::{CheckSettings, MatchMode};
use tokio::fs;

use super::error::ConfigError;
use crate::serialization::DocumentFormat;

/// Overrides `default_status`.
pub const ENV_DEFAULT_STATUS: &str = "RESPCHECK_DEFAULT_STATUS";
/// Overrides `default_max_response_ms`.
pub const ENV_DEFAULT_MAX_RESPONSE_MS: &str = "RESPCHECK_DEFAULT_MAX_RESPONSE_MS";
/// Overrides `description_variable`.
pub const ENV_DESCRIPTION_VARIABLE: &str = "RESPCHECK_DESCRIPTION_VARIABLE";
/// Overrides `default_match_mode` (`exact` or `fuzzy`).
pub const ENV_MATCH_MODE: &str = "RESPCHECK_MATCH_MODE";

/// Loads check settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsLoader {
    skip_env: bool,
}

impl SettingsLoader {
    /// Creates a loader that honours environment overrides.
    #[must_use]
    pub const fn new() -> Self {
        Self { skip_env: false }
    }

    /// Ignores environment overrides (builder pattern).
    #[must_use]
    pub const fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads settings from `path`, or starts from the defaults when `path`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an override is
    /// malformed, or the result fails validation.
    pub async fn load(&self, path: Option<&Path>) -> Result<CheckSettings, ConfigError> {
        let settings = match path {
            Some(path) => read_settings(path).await?,
            None => CheckSettings::default(),
        };

        let settings = if self.skip_env {
            settings
        } else {
            apply_overrides(settings, |name| std::env::var(name).ok())?
        };

        settings.validate()?;
        tracing::debug!(?settings, "settings loaded");
        Ok(settings)
    }
}

async fn read_settings(path: &Path) -> Result<CheckSettings, ConfigError> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

    let content = fs::read(path).await.map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    format.parse(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Applies overrides looked up through `lookup`. Empty values are ignored.
///
/// # Errors
///
/// Returns `ConfigError::InvalidOverride` for values that do not parse.
pub(crate) fn apply_overrides<F>(
    mut settings: CheckSettings,
    lookup: F,
) -> Result<CheckSettings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(value) = get(ENV_DEFAULT_STATUS) {
        settings.default_status = value.trim().parse().map_err(|_| ConfigError::InvalidOverride {
            variable: ENV_DEFAULT_STATUS,
            value: value.clone(),
        })?;
    }

    if let Some(value) = get(ENV_DEFAULT_MAX_RESPONSE_MS) {
        settings.default_max_response_ms =
            value.trim().parse().map_err(|_| ConfigError::InvalidOverride {
                variable: ENV_DEFAULT_MAX_RESPONSE_MS,
                value: value.clone(),
            })?;
    }

    if let Some(value) = get(ENV_DESCRIPTION_VARIABLE) {
        settings.description_variable = value.trim().to_string();
    }

    if let Some(value) = get(ENV_MATCH_MODE) {
        settings.default_match_mode = match value.trim().to_ascii_lowercase().as_str() {
            "exact" => MatchMode::Exact,
            "fuzzy" => MatchMode::Fuzzy,
            _ => {
                return Err(ConfigError::InvalidOverride {
                    variable: ENV_MATCH_MODE,
                    value,
                });
            }
        };
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn overrides_replace_file_values() {
        let settings = apply_overrides(
            CheckSettings::default(),
            lookup(&[
                (ENV_DEFAULT_STATUS, "201"),
                (ENV_DEFAULT_MAX_RESPONSE_MS, " 500 "),
                (ENV_DESCRIPTION_VARIABLE, "nextTestName"),
                (ENV_MATCH_MODE, "Fuzzy"),
            ]),
        )
        .expect("overrides");

        assert_eq!(settings.default_status, 201);
        assert_eq!(settings.default_max_response_ms, 500);
        assert_eq!(settings.description_variable, "nextTestName");
        assert_eq!(settings.default_match_mode, MatchMode::Fuzzy);
    }

    #[test]
    fn empty_overrides_are_ignored() {
        let settings =
            apply_overrides(CheckSettings::default(), lookup(&[(ENV_DEFAULT_STATUS, "")]))
                .expect("overrides");
        assert_eq!(settings, CheckSettings::default());
    }

    #[test]
    fn malformed_override_is_rejected() {
        let result =
            apply_overrides(CheckSettings::default(), lookup(&[(ENV_MATCH_MODE, "loose")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOverride { variable: ENV_MATCH_MODE, .. })
        ));
    }

    #[tokio::test]
    async fn load_yaml_file() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("settings.yaml");
        std::fs::write(&path, "default_status: 204\nstop_on_failure: true\n").expect("write");

        let settings = SettingsLoader::new()
            .without_env()
            .load(Some(&path))
            .await
            .expect("load");

        assert_eq!(settings.default_status, 204);
        assert!(settings.stop_on_failure);
        assert_eq!(settings.default_max_response_ms, 200);
    }

    #[tokio::test]
    async fn load_rejects_invalid_settings() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("settings.json");
        std::fs::write(&path, r#"{"default_status": 1000}"#).expect("write");

        let result = SettingsLoader::new().without_env().load(Some(&path)).await;
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[tokio::test]
    async fn load_rejects_unknown_extension() {
        let result = SettingsLoader::new()
            .without_env()
            .load(Some(Path::new("settings.toml")))
            .await;
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn defaults_without_file() {
        let settings = SettingsLoader::new().without_env().load(None).await.expect("load");
        assert_eq!(settings, CheckSettings::default());
    }
}

//! Check Settings Domain Model
//!
//! Defaults that named checks fall back to when the caller omits an argument.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::whitelist::MatchMode;

/// Variable name that holds the pending one-shot test description.
pub const DEFAULT_DESCRIPTION_VARIABLE: &str = "testDescription";

/// Settings shared by every check of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSettings {
    /// Status code expected by `ResponseCode` when none is given.
    #[serde(default = "default_status")]
    pub default_status: u16,

    /// Upper bound (exclusive) used by `ResponseTime` when none is given.
    #[serde(default = "default_max_response_ms")]
    pub default_max_response_ms: u64,

    /// Variable that stores the pending description override.
    #[serde(default = "default_description_variable")]
    pub description_variable: String,

    /// Whitelist match mode used by suites that do not set one.
    #[serde(default)]
    pub default_match_mode: MatchMode,

    /// Whether a suite stops at its first failed outcome.
    #[serde(default)]
    pub stop_on_failure: bool,
}

const fn default_status() -> u16 {
    200
}

const fn default_max_response_ms() -> u64 {
    200
}

fn default_description_variable() -> String {
    DEFAULT_DESCRIPTION_VARIABLE.to_string()
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            default_status: default_status(),
            default_max_response_ms: default_max_response_ms(),
            description_variable: default_description_variable(),
            default_match_mode: MatchMode::default(),
            stop_on_failure: false,
        }
    }
}

impl CheckSettings {
    /// Checks the settings for values no run could use.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSettings` when the default status is not a
    /// valid HTTP status or the description variable name is empty.
    pub fn validate(&self) -> DomainResult<()> {
        if !(100..=599).contains(&self.default_status) {
            return Err(DomainError::InvalidSettings(format!(
                "default_status {} is not an HTTP status code",
                self.default_status
            )));
        }
        if self.description_variable.trim().is_empty() {
            return Err(DomainError::InvalidSettings(
                "description_variable must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = CheckSettings::default();
        assert_eq!(settings.default_status, 200);
        assert_eq!(settings.default_max_response_ms, 200);
        assert_eq!(settings.description_variable, "testDescription");
        assert_eq!(settings.default_match_mode, MatchMode::Exact);
        assert!(!settings.stop_on_failure);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: CheckSettings =
            serde_json::from_str(r#"{"default_match_mode": "fuzzy"}"#).expect("parse");
        assert_eq!(settings.default_match_mode, MatchMode::Fuzzy);
        assert_eq!(settings.default_status, 200);
        assert_eq!(settings.description_variable, "testDescription");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let settings = CheckSettings {
            default_status: 42,
            ..CheckSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(DomainError::InvalidSettings(_))
        ));

        let settings = CheckSettings {
            description_variable: "  ".to_string(),
            ..CheckSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}

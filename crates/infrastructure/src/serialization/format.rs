//! Document formats accepted for settings and suite files.

use std::path::Path;

use serde::de::DeserializeOwned;

use super::json::{SerializationError, from_json_bytes};

/// Format of a settings or suite document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json` files.
    Json,
    /// `.yaml` and `.yml` files.
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from the file extension.
    ///
    /// Returns `None` for unknown or missing extensions.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Deserializes a document in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is invalid or doesn't match the
    /// expected type.
    pub fn parse<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, SerializationError> {
        match self {
            Self::Json => from_json_bytes(bytes),
            Self::Yaml => Ok(serde_yaml::from_slice(bytes)?),
        }
    }
}

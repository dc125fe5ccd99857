//! Naming pass configuration.

use serde::{Deserialize, Serialize};

use crate::error::NamingError;

/// Attribute tag recognized when no other language is configured.
pub const DEFAULT_LANGUAGE: &str = "csharp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Target-language settings for one run of the naming pass.
pub struct NamingOptions {
    /// Attribute tag that addresses this target language (exact match).
    pub language: String,
    /// Suffix appended to a method's capitalized name for its request type.
    pub request_suffix: String,
    /// Suffix appended to a method's capitalized name for its response type.
    pub response_suffix: String,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            request_suffix: "Request".to_string(),
            response_suffix: "Response".to_string(),
        }
    }
}

impl NamingOptions {
    /// Default options addressed to a different attribute tag.
    pub fn for_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    /// Parses options from JSON; missing keys take their defaults.
    pub fn from_json_str(input: &str) -> Result<Self, NamingError> {
        serde_json::from_str(input).map_err(|e| NamingError::ModelError(e.to_string()))
    }
}

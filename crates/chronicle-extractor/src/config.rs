//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for loading and flattening a source document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum source document size (bytes)
    pub max_document_bytes: u64,

    /// Log every entry dropped for an unparseable date
    pub log_skipped: bool,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_document_bytes == 0 {
            return Err("max_document_bytes must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: 256 * 1024 * 1024,
            log_skipped: true,
        }
    }
}

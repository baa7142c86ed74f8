//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use chronicle_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input documents
    #[serde(default)]
    pub sources: Sources,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// External PDF viewer
    #[serde(default)]
    pub viewer: ViewerSettings,

    /// Document loading
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

/// Input document locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sources {
    /// Extracted records (JSON)
    #[serde(default = "default_data_path")]
    pub data: PathBuf,

    /// Source document (PDF)
    #[serde(default = "default_pdf_path")]
    pub pdf: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Number of date columns in the timeline chart
    #[serde(default = "default_timeline_width")]
    pub timeline_width: usize,
}

/// External PDF viewer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Command template with `{path}`, `{page}` and `{width}` placeholders,
    /// e.g. `zathura --page={page} {path}`. Unset prints the request instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Rendering width hint passed to the viewer
    #[serde(default = "default_pdf_width")]
    pub width: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(chronicle_dir()?.join("config.toml"))
    }

    /// Load configuration from `path` or fall back to defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check settings that would make the session unusable.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate().map_err(CliError::Config)?;
        if self.settings.timeline_width < 2 {
            return Err(CliError::Config(
                "timeline_width must be at least 2".to_string(),
            ));
        }
        if let Some(command) = &self.viewer.command {
            if command.trim().is_empty() {
                return Err(CliError::Config("viewer.command is empty".to_string()));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: Sources::default(),
            settings: Settings::default(),
            viewer: ViewerSettings::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            data: default_data_path(),
            pdf: default_pdf_path(),
        }
    }
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            command: None,
            width: default_pdf_width(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
            timeline_width: default_timeline_width(),
        }
    }
}

/// Directory holding the config file and REPL history.
pub fn chronicle_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(".chronicle"))
}

fn default_data_path() -> PathBuf {
    PathBuf::from("up_in_flames_graph.json")
}

fn default_pdf_path() -> PathBuf {
    PathBuf::from("georgia0109web.pdf")
}

fn default_pdf_width() -> String {
    "100%".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

fn default_timeline_width() -> usize {
    60
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sources.data, PathBuf::from("up_in_flames_graph.json"));
        assert_eq!(config.sources.pdf, PathBuf::from("georgia0109web.pdf"));
        assert!(config.settings.color);
        assert!(config.viewer.command.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.settings.timeline_width, 60);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[sources]\ndata = \"corpus.json\"\n\n[viewer]\ncommand = \"zathura --page={page} {path}\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.sources.data, PathBuf::from("corpus.json"));
        assert_eq!(config.sources.pdf, PathBuf::from("georgia0109web.pdf"));
        assert_eq!(config.viewer.width, "100%");
        assert!(config.viewer.command.is_some());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_timeline_width_rejected() {
        let mut config = Config::default();
        config.settings.timeline_width = 1;
        assert!(config.validate().is_err());
    }
}

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ReflectError, Result};

/// Top-level configuration for the Reflect application.
///
/// Loaded from `~/.reflect/config.toml` by default. Each section corresponds
/// to one concern; every section and field has a default so a partial file
/// parses cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReflectConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

impl ReflectConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ReflectConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ReflectError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Editor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Placeholder text shown when the draft is empty.
    pub placeholder: String,
    /// Whether the voice-input widget is wired up.
    pub voice_enabled: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: "Write your reflection here...".to_string(),
            voice_enabled: true,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReflectConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert!(config.editor.voice_enabled);
        assert!(!config.editor.placeholder.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = ReflectConfig::default();
        config.general.log_level = "debug".to_string();
        config.editor.voice_enabled = false;
        config.save(&path).unwrap();

        let loaded = ReflectConfig::load(&path).unwrap();
        assert_eq!(loaded.general.log_level, "debug");
        assert!(!loaded.editor.voice_enabled);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = ReflectConfig::load(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ReflectConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\nlog_level = \"trace\"\n").unwrap();

        let config = ReflectConfig::load(&path).unwrap();
        assert_eq!(config.general.log_level, "trace");
        // Untouched section keeps its defaults.
        assert!(config.editor.voice_enabled);
    }

    #[test]
    fn test_malformed_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "general = [[[").unwrap();

        assert!(ReflectConfig::load(&path).is_err());
        // load_or_default recovers.
        let config = ReflectConfig::load_or_default(&path);
        assert_eq!(config.general.log_level, "info");
    }
}

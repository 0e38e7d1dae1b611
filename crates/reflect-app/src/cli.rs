//! CLI argument definitions for the Reflect application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Reflect — edit a reflection with voice-input augmentation.
#[derive(Parser, Debug)]
#[command(name = "reflect", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Initial draft text for the session.
    #[arg(short = 'b', long = "body", default_value = "")]
    pub body: String,

    /// Start from a record that has no identifier yet (saving will fail).
    #[arg(long = "transient")]
    pub transient: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > REFLECT_CONFIG env var > platform default
    /// (~/.reflect/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("REFLECT_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > REFLECT_LOG env var > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        if let Ok(level) = std::env::var("REFLECT_LOG") {
            if !level.is_empty() {
                return level;
            }
        }
        config_level.to_string()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".reflect").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".reflect").join("config.toml");
    }
    PathBuf::from("config.toml")
}

// =============================================================================
// Tests
// =============================================================================

//! Application configuration module
//!
//! Handles loading runtime settings from environment variables. Every
//! setting has a default; a comparison run never fails on configuration.

use std::path::PathBuf;

/// Report output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Directory the JSON artifact is written to.
    pub dir: PathBuf,
    /// Whether the console report uses ANSI colors.
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            color: true,
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub output: OutputConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Self {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let dir = std::env::var("OUTPUT_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| OutputConfig::default().dir);

        // NO_COLOR convention: any non-empty value disables ANSI output.
        let color = std::env::var("NO_COLOR")
            .map(|v| v.is_empty())
            .unwrap_or(true);

        Self {
            output: OutputConfig { dir, color },
        }
    }
}

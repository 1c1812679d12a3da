// Application settings
// Loaded from ~/.config/gridmark/settings.json

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the default grid lives. Empty = platform data directory.
    #[serde(rename = "grid.defaultPath")]
    pub default_grid_path: String,

    /// How long an ambiguous shortcut prefix waits before being dropped.
    #[serde(rename = "input.shortcutTimeoutMs")]
    pub shortcut_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_grid_path: String::new(),
            shortcut_timeout_ms: 1000,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridmark");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file();
            return settings;
        }

        match fs::read_to_string(&path) {
            Ok(contents) => {
                // Strip comments (lines starting with //)
                let cleaned: String = contents
                    .lines()
                    .filter(|line| !line.trim().starts_with("//"))
                    .collect::<Vec<_>>()
                    .join("\n");

                match serde_json::from_str(&cleaned) {
                    Ok(settings) => settings,
                    Err(e) => {
                        eprintln!("Error parsing settings.json: {}", e);
                        eprintln!("Using default settings");
                        Self::default()
                    }
                }
            }
            Err(e) => {
                eprintln!("Error reading settings.json: {}", e);
                Self::default()
            }
        }
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::config_path();

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(&path, json).map_err(|e| e.to_string())
    }

    /// The shortcut timeout as a duration, for wiring into the resolver.
    pub fn shortcut_timeout(&self) -> Duration {
        Duration::from_millis(self.shortcut_timeout_ms)
    }

    /// Create default settings file with comments
    fn create_default_file(&self) {
        let path = Self::config_path();

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // Grid handling
    // Empty = <platform data dir>/gridmark/default.grid
    "grid.defaultPath": "",

    // Input
    // How long an ambiguous shortcut prefix waits before being dropped
    "input.shortcutTimeoutMs": 1000
}
"#;

        if let Err(e) = fs::write(&path, default_config) {
            eprintln!("Error writing default settings.json: {}", e);
        }
    }

    /// Get the config file path for display/opening
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.shortcut_timeout(), Duration::from_millis(1000));
        assert!(settings.default_grid_path.is_empty());
    }

    #[test]
    fn test_parse_with_comment_lines() {
        let raw = r#"{
    // user tweaked this
    "input.shortcutTimeoutMs": 250
}
"#;
        let cleaned: String = raw
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        let settings: Settings = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(settings.shortcut_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_unknown_fields_are_tolerated() {
        let settings: Settings =
            serde_json::from_str(r#"{"grid.defaultPath": "/tmp/x.grid", "ui.fontSize": 13}"#)
                .unwrap();
        assert_eq!(settings.default_grid_path, "/tmp/x.grid");
    }
}

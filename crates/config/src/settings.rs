// Application settings
// Loaded from ~/.config/qservicos/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use qservicos_address::HeuristicConfig;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Location picker
    /// Copy the geocoded street into the address field on each pick
    #[serde(rename = "location.syncStreet")]
    pub sync_street: bool,

    /// Optional TOML file overriding the address heuristic rules
    #[serde(rename = "location.heuristicConfig")]
    pub heuristic_config: Option<PathBuf>,

    // Store
    /// Local store file; None = ~/.config/qservicos/store.json
    #[serde(rename = "store.path")]
    pub store_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sync_street: true,
            heuristic_config: None,
            store_path: None,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        crate::config_dir().join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from an explicit file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
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
                        log::warn!("error parsing {}: {e}; using default settings", path.display());
                        Self::default()
                    }
                }
            }
            Err(e) => {
                log::warn!("error reading {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, json).map_err(|e| ConfigError::io(path, e))
    }

    /// Heuristic rules: the configured TOML file, or the built-in defaults.
    pub fn heuristic(&self) -> Result<HeuristicConfig, ConfigError> {
        match &self.heuristic_config {
            Some(path) => load_heuristic(path),
            None => Ok(HeuristicConfig::default()),
        }
    }
}

/// Read and validate a heuristic TOML file.
pub fn load_heuristic(path: &Path) -> Result<HeuristicConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    HeuristicConfig::from_toml(&text).map_err(ConfigError::Heuristic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
        assert!(settings.sync_street);
    }

    #[test]
    fn comments_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            "{\n    // keep what the user typed\n    \"location.syncStreet\": false\n}\n",
        )
        .unwrap();
        let settings = Settings::load_from(&path);
        assert!(!settings.sync_street);
        assert_eq!(settings.heuristic_config, None);
    }

    #[test]
    fn broken_json_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            sync_street: false,
            heuristic_config: Some(PathBuf::from("/etc/qservicos/rules.toml")),
            store_path: None,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn heuristic_file_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        fs::write(&path, "[city]\nmin_length = 0\n").unwrap();
        let settings = Settings {
            heuristic_config: Some(path),
            ..Settings::default()
        };
        assert!(matches!(settings.heuristic(), Err(ConfigError::Heuristic(_))));
    }

    #[test]
    fn missing_heuristic_file_is_io_error() {
        let settings = Settings {
            heuristic_config: Some(PathBuf::from("/definitely/not/here.toml")),
            ..Settings::default()
        };
        assert!(matches!(settings.heuristic(), Err(ConfigError::Io { .. })));
    }
}

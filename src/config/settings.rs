use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::Settings;

const APP_NAME: &str = "PlaylistSweeper";
const SETTINGS_FILE: &str = "settings.json";

/// Returns the platform-specific configuration directory for the sweeper.
pub fn get_settings_directory() -> Option<PathBuf> {
    ProjectDirs::from("io", "devsam", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the settings file.
pub fn get_settings_file_path() -> Option<PathBuf> {
    get_settings_directory().map(|dir| dir.join(SETTINGS_FILE))
}

/// Loads the settings from the settings file, or from `override_path` when
/// given (used by tests).
///
/// If the file doesn't exist, it creates a default one. If the file is
/// corrupted or cannot be parsed, it logs a warning and falls back to the
/// defaults to prevent a crash.
pub fn load_settings(override_path: Option<&Path>) -> Result<Settings> {
    let settings_path = match override_path {
        Some(path) => path.to_path_buf(),
        None => get_settings_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine settings directory"))?,
    };

    if !settings_path.exists() {
        tracing::info!(
            "Settings file not found, creating defaults at {:?}",
            settings_path
        );
        let defaults = Settings::default();
        save_settings(&defaults, Some(&settings_path))?;
        return Ok(defaults);
    }

    let content = fs::read_to_string(&settings_path)?;

    match serde_json::from_str::<Settings>(&content) {
        Ok(mut settings) => {
            settings.sanitize();
            tracing::info!("Loaded settings from {:?}", settings_path);
            Ok(settings)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse settings file at {:?}: {}. Falling back to defaults.",
                settings_path,
                e
            );
            Ok(Settings::default())
        }
    }
}

/// Saves the provided settings, to `override_path` when given.
pub fn save_settings(settings: &Settings, override_path: Option<&Path>) -> Result<()> {
    let settings_path = match override_path {
        Some(path) => path.to_path_buf(),
        None => get_settings_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine settings directory"))?,
    };

    if let Some(parent) = settings_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            tracing::info!("Created settings directory: {:?}", parent);
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(&settings_path, json)?;
    tracing::info!("Saved settings to {:?}", settings_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_THRESHOLD;

    #[test]
    fn missing_file_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "threshold": 50 }"#).unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.threshold, 50);
        assert!(settings.require_confirmation);
        assert!(settings.enable_toast);
        assert!(settings.auto_rescan_after_cleaning);
    }

    #[test]
    fn out_of_range_threshold_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "threshold": 250 }"#).unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.threshold = 90;
        settings.enable_toast = false;
        save_settings(&settings, Some(&path)).unwrap();

        assert_eq!(load_settings(Some(&path)).unwrap(), settings);
    }
}

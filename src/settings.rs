//! Game settings and preferences
//!
//! Native builds read `settings.json` from the working directory (or the
//! path in `GATE_RUNNER_SETTINGS`); the browser build uses LocalStorage.
//! Anything missing falls back to defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::Volume;
use crate::tuning::Tuning;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Start muted
    pub muted: bool,
    /// Directory holding jump.wav, collision.wav and coin.wav
    pub assets_dir: String,

    // === Persistence ===
    /// High score file (native only)
    pub high_score_path: String,

    // === Simulation ===
    /// Fixed seed for reproducible runs (random if absent)
    pub seed: Option<u64>,
    /// Balance overrides
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            assets_dir: ".".to_string(),
            high_score_path: "highscore.txt".to_string(),
            seed: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Volume controls for the audio backend
    pub fn volume(&self) -> Volume {
        Volume::new(
            self.master_volume,
            self.sfx_volume,
            self.music_volume,
            self.muted,
        )
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Settings file used when no override is given
    #[cfg(not(target_arch = "wasm32"))]
    pub const DEFAULT_PATH: &'static str = "settings.json";

    /// Environment variable naming an alternate settings file
    #[cfg(not(target_arch = "wasm32"))]
    pub const PATH_ENV: &'static str = "GATE_RUNNER_SETTINGS";

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load settings from disk, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::env::var_os(Self::PATH_ENV)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(Self::DEFAULT_PATH));

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "gate_runner_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("{}, using defaults", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_json(
            r#"{"muted": true, "seed": 7, "tuning": {"gravity": 1.0}}"#,
        )
        .unwrap();
        assert!(settings.muted);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tuning.gravity, 1.0);
        assert_eq!(settings.tuning.jump_velocity, -8.0);
        assert_eq!(settings.volume().effective(), 0.0);
    }

    #[test]
    fn test_music_volume() {
        let settings = Settings::from_json(r#"{"master_volume": 1.0, "music_volume": 0.25}"#).unwrap();
        assert_eq!(settings.volume().music_effective(), 0.25);
        assert_eq!(Settings::default().volume().music_effective(), 0.4);
    }

    #[test]
    fn test_bad_difficulty_table_rejected() {
        let result = Settings::from_json(r#"{"tuning": {"difficulty": []}}"#);
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Settings::load_from(std::path::Path::new("/no/such/settings.json"));
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }

    #[test]
    fn test_round_trip_json() {
        let mut settings = Settings::default();
        settings.seed = Some(99);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}

//! Game settings and preferences
//!
//! Stored as JSON: LocalStorage on the web, an optional file natively.

use serde::{Deserialize, Serialize};

use crate::sim::Viewport;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// Viewport width in pixels
    pub viewport_width: f32,
    /// Viewport height in pixels (floored when building the viewport)
    pub viewport_height: f32,
    /// Fixed run seed; a fresh one is drawn when unset
    pub seed: Option<u64>,

    // === Audio ===
    pub sfx_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            viewport_width: viewport.width,
            viewport_height: viewport.height,
            seed: None,

            sfx_enabled: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rats_settings";

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Viewport the level generator should use
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    /// Effective sound effect volume (0 when disabled)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.sfx_enabled {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

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
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
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
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MIN_VIEWPORT_HEIGHT;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "sfx_enabled": false }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(!settings.sfx_enabled);
        assert_eq!(settings.master_volume, Settings::default().master_volume);
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            viewport_width: 1280.0,
            seed: Some(7),
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
        assert!(Settings::from_json(r#"{ "seed": "abc" }"#).is_err());
    }

    #[test]
    fn test_small_viewport_is_floored() {
        let settings = Settings {
            viewport_height: 20.0,
            ..Default::default()
        };
        assert_eq!(settings.viewport().height, MIN_VIEWPORT_HEIGHT);
    }

    #[test]
    fn test_effective_sfx_volume() {
        let mut settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.25);

        // Out-of-range values from hand-edited JSON are clamped per factor
        settings.master_volume = 3.0;
        settings.sfx_volume = -1.0;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        settings.sfx_volume = 2.0;
        assert_eq!(settings.effective_sfx_volume(), 1.0);

        settings.sfx_enabled = false;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load_from(std::path::Path::new("/nonexistent/rats.json"));
        assert_eq!(settings, Settings::default());
    }
}

//! Host settings
//!
//! Read once at startup from the stage canvas's `data-settings` attribute
//! (a JSON object; every field optional). Nothing is ever written back.

use serde::{Deserialize, Serialize};

use crate::error::StartupError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// URL of the shot sound effect
    pub shoot_sound_url: String,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// Fixed RNG seed; the current time is used when absent
    pub seed: Option<u64>,
    /// Log level name for the browser console
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shoot_sound_url: "../assets/shoot.wav".to_string(),
            master_volume: 0.8,
            muted: false,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Attribute on the stage canvas holding the settings JSON
    pub const ATTRIBUTE: &'static str = "data-settings";

    /// Parse settings JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, StartupError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Effective volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Configured log level, falling back to `Info` on unknown names
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "muted": true, "seed": 7 }"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.shoot_sound_url, Settings::default().shoot_sound_url);
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_volume_clamped() {
        let settings = Settings::from_json(r#"{ "master_volume": 3.5 }"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.effective_volume(), 1.0);
    }

    #[test]
    fn test_log_level() {
        let settings = Settings::from_json(r#"{ "log_level": "debug" }"#).unwrap();
        assert_eq!(settings.log_level(), log::Level::Debug);

        let settings = Settings::from_json(r#"{ "log_level": "loud" }"#).unwrap();
        assert_eq!(settings.log_level(), log::Level::Info);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ muted: yes }"),
            Err(StartupError::Settings(_))
        ));
    }
}

/// Player configuration
use crate::error::{AsterError, Result};
use crate::format::DisplayLocale;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AsterConfig {
    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_display")]
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Initial volume (0.0-1.0)
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f32,

    #[serde(default)]
    pub start_muted: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub locale: DisplayLocale,

    /// Offset applied to creation timestamps before formatting
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

impl AsterConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables are prefixed with `ASTER_` and use `__` as the
    /// section separator, e.g. `ASTER_PLAYBACK__INITIAL_VOLUME=0.5`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            } else {
                tracing::warn!("Config file {:?} not found, using defaults", path);
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ASTER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let volume = self.playback.initial_volume;
        if !volume.is_finite() || !(0.0..=1.0).contains(&volume) {
            return Err(AsterError::config(format!(
                "playback.initial_volume must be within 0.0-1.0, got {volume}"
            )));
        }

        // Real-world offsets span UTC-12:00 to UTC+14:00
        if !(-12 * 60..=14 * 60).contains(&self.display.utc_offset_minutes) {
            return Err(AsterError::config(format!(
                "display.utc_offset_minutes out of range: {}",
                self.display.utc_offset_minutes
            )));
        }

        Ok(())
    }
}

impl Default for AsterConfig {
    fn default() -> Self {
        Self {
            playback: default_playback(),
            display: default_display(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        default_playback()
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        default_display()
    }
}

// Default values
fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        initial_volume: default_initial_volume(),
        start_muted: false,
    }
}

fn default_initial_volume() -> f32 {
    1.0
}

fn default_display() -> DisplaySettings {
    DisplaySettings {
        locale: DisplayLocale::KoKr,
        utc_offset_minutes: default_utc_offset_minutes(),
    }
}

fn default_utc_offset_minutes() -> i32 {
    9 * 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = AsterConfig::default();
        assert_eq!(config.playback.initial_volume, 1.0);
        assert!(!config.playback.start_muted);
        assert_eq!(config.display.locale, DisplayLocale::KoKr);
        assert_eq!(config.display.utc_offset_minutes, 540);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[playback]\ninitial_volume = 0.25\n\n[display]\nlocale = \"en-us\"").unwrap();

        let config = AsterConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.playback.initial_volume, 0.25);
        assert!(!config.playback.start_muted);
        assert_eq!(config.display.locale, DisplayLocale::EnUs);
        assert_eq!(config.display.utc_offset_minutes, 540);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = AsterConfig::load(Some(Path::new("/nonexistent/aster.toml"))).unwrap();
        assert_eq!(config.playback, PlaybackSettings::default());
    }

    #[test]
    fn rejects_out_of_range_volume() {
        let mut config = AsterConfig::default();
        config.playback.initial_volume = 1.5;
        assert!(matches!(config.validate(), Err(AsterError::Config(_))));

        config.playback.initial_volume = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_impossible_offset() {
        let mut config = AsterConfig::default();
        config.display.utc_offset_minutes = 24 * 60;
        assert!(config.validate().is_err());
    }
}

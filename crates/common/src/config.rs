//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CuelineError, CuelineResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Narration timing heuristics.
    pub timing: TimingConfig,

    /// Playback scheduler settings.
    pub playback: PlaybackConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Heuristics used to derive clip timing from narration text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Speaking rate in spoken characters per second.
    pub chars_per_second: f64,

    /// Lower bound for any clip duration, in seconds.
    pub min_clip_secs: f64,
}

/// Playback scheduler settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Period of the playhead tick in milliseconds (best effort).
    pub tick_interval_ms: u64,

    /// Sample rate assumed for synthesized PCM16 voiceovers.
    pub sample_rate: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "cueline=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl TimingConfig {
    /// Default speaking rate.
    pub const DEFAULT_CHARS_PER_SECOND: f64 = 4.0;

    /// Default duration floor.
    pub const DEFAULT_MIN_CLIP_SECS: f64 = 3.0;
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            chars_per_second: Self::DEFAULT_CHARS_PER_SECOND,
            min_clip_secs: Self::DEFAULT_MIN_CLIP_SECS,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 30,
            sample_rate: 24_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> CuelineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }

    /// Reject values the timing model cannot work with.
    pub fn validate(&self) -> CuelineResult<()> {
        let rate = self.timing.chars_per_second;
        if rate.is_nan() || rate <= 0.0 {
            return Err(CuelineError::config(format!(
                "timing.chars_per_second must be positive, got {rate}"
            )));
        }
        let floor = self.timing.min_clip_secs;
        if floor.is_nan() || floor < 0.0 {
            return Err(CuelineError::config(format!(
                "timing.min_clip_secs must be non-negative, got {floor}"
            )));
        }
        if self.playback.sample_rate == 0 {
            return Err(CuelineError::config("playback.sample_rate must be non-zero"));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("cueline").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.playback.tick_interval_ms, 30);
        assert_eq!(config.playback.sample_rate, 24_000);
        assert!((config.timing.chars_per_second - 4.0).abs() < 1e-9);
        assert!((config.timing.min_clip_secs - 3.0).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_section_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"timing":{"chars_per_second":6.5}}"#).unwrap();
        assert!((config.timing.chars_per_second - 6.5).abs() < 1e-9);
        assert!((config.timing.min_clip_secs - 3.0).abs() < 1e-9);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_rejects_zero_speaking_rate() {
        let dir = std::env::temp_dir().join("cueline_test_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{"timing":{"chars_per_second":0.0}}"#).unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("chars_per_second"));

        std::fs::remove_dir_all(&dir).ok();
    }
}

//! Combo engine configuration.
//!
//! A `ComboConfig` is consumed once, at construction: trackers and sessions
//! validate it and fail fast on bad values. There is no runtime fallback to
//! defaults for an invalid config; only a *missing* config file falls back
//! (and writes the defaults so the user has something to edit).
//!
//! On disk this is `~/.config/snapsift/combo.toml`:
//!
//! ```toml
//! decay_window_ms = 2000
//!
//! [[thresholds]]
//! min_count = 0
//! level = "none"
//! ```

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::combo::{LevelClassifier, LevelThreshold};
use crate::error::ConfigError;

/// Combo engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboConfig {
    /// Max idle gap (milliseconds) that still extends a streak; also the
    /// idle time after which the watchdog clears the combo. Validation
    /// accepts `1..=MAX_DECAY_WINDOW_MS`.
    #[serde(default = "default_decay_window_ms")]
    pub decay_window_ms: u64,
    /// Count-to-level threshold table, lowest count first.
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<LevelThreshold>,
}

fn default_decay_window_ms() -> u64 {
    2000
}

fn default_thresholds() -> Vec<LevelThreshold> {
    LevelClassifier::default_table()
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            decay_window_ms: default_decay_window_ms(),
            thresholds: default_thresholds(),
        }
    }
}

impl ComboConfig {
    /// Largest accepted `decay_window_ms`: one day.
    ///
    /// Bounds the watchdog deadline `last_action_at + window` so it stays
    /// inside the representable time range.
    pub const MAX_DECAY_WINDOW_MS: u64 = 86_400_000;

    /// Check the config without building anything from it.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero or beyond-cap decay window, or a
    /// threshold table that is empty, gapped at zero, or not strictly
    /// escalating.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decay_window_ms == 0 {
            return Err(ConfigError::ZeroDecayWindow(self.decay_window_ms));
        }
        if self.decay_window_ms > Self::MAX_DECAY_WINDOW_MS {
            return Err(ConfigError::DecayWindowTooLong {
                got: self.decay_window_ms,
                max: Self::MAX_DECAY_WINDOW_MS,
            });
        }
        LevelClassifier::new(self.thresholds.clone()).map(|_| ())
    }

    /// Decay window as a duration.
    pub fn decay_window(&self) -> Duration {
        Duration::milliseconds(i64::try_from(self.decay_window_ms).unwrap_or(i64::MAX))
    }

    /// Returns `~/.config/snapsift[-dev]/` based on SNAPSIFT_ENV.
    ///
    /// Set SNAPSIFT_ENV=dev to use the development config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("SNAPSIFT_ENV").unwrap_or_else(|_| "production".to_string());

        let dir = if env == "dev" {
            base_dir.join("snapsift-dev")
        } else {
            base_dir.join("snapsift")
        };

        std::fs::create_dir_all(&dir)
            .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
        Ok(dir)
    }

    /// Path of the combo config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be resolved.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("combo.toml"))
    }

    /// Load from the default location, writing defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed or fails
    /// validation, or if the defaults cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if missing.
    ///
    /// # Errors
    ///
    /// Same as [`ComboConfig::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config: ComboConfig =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.save_to(path)?;
                Ok(config)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Same as [`ComboConfig::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from disk, returning defaults on any error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

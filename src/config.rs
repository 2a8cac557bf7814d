use std::path::Path;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{GravitySchedule, DEFAULT_GRAVITY_INTERVAL};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rules: RulesConfig,
    pub ui: UiConfig,
}

/// Game rules.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Resample gravity every `gravity_interval` placements. Off means
    /// classic downward gravity.
    pub dynamic_gravity: bool,
    pub gravity_interval: u32,
    /// Fixed seed for gravity draws; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            dynamic_gravity: true,
            gravity_interval: DEFAULT_GRAVITY_INTERVAL,
            seed: None,
        }
    }
}

impl RulesConfig {
    pub fn schedule(&self) -> GravitySchedule {
        if self.dynamic_gravity {
            GravitySchedule::new(self.gravity_interval)
        } else {
            GravitySchedule::classic()
        }
    }
}

/// Terminal UI timings, all in milliseconds.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    pub fall_duration_ms: u64,
    /// Pause after the fall before a win or draw is announced.
    pub reveal_delay_ms: u64,
    pub gravity_notice_ms: u64,
    pub celebration_ms: u64,
    pub celebration_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            tick_rate_ms: 33,
            fall_duration_ms: 300,
            reveal_delay_ms: 50,
            gravity_notice_ms: 3000,
            celebration_ms: 3000,
            celebration_interval_ms: 250,
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn fall_duration(&self) -> Duration {
        Duration::from_millis(self.fall_duration_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn gravity_notice(&self) -> Duration {
        Duration::from_millis(self.gravity_notice_ms)
    }

    pub fn celebration(&self) -> Duration {
        Duration::from_millis(self.celebration_ms)
    }

    pub fn celebration_interval(&self) -> Duration {
        Duration::from_millis(self.celebration_interval_ms)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.gravity_interval == 0 {
            return Err(ConfigError::Validation(
                "rules.gravity_interval must be > 0".into(),
            ));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.tick_rate_ms must be > 0".into(),
            ));
        }
        if self.ui.celebration_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.celebration_interval_ms must be > 0".into(),
            ));
        }
        if self.ui.celebration_ms > 0 && self.ui.celebration_interval_ms > self.ui.celebration_ms {
            return Err(ConfigError::Validation(
                "ui.celebration_interval_ms must be <= ui.celebration_ms".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&AppConfig::default())?)
    }
}

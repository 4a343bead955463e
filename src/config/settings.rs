//! Configuration settings for shopdash.
//!
//! Settings are loaded from `~/.shopdash/config.yaml`. Every field has a
//! default, so a missing file or a partial file is fine.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::ShopError;
use crate::tracking::ActivityLabel;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Time tracking settings.
    pub tracking: TrackingConfig,
    /// Demo login settings.
    pub login: LoginConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    pub default_output: OutputFormat,
    /// Color output setting.
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the `colored` crate's global override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Time tracking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Display refresh interval in milliseconds.
    pub tick_interval_ms: u64,
    /// Refuse to start tracking until a job is selected.
    pub require_job_selection: bool,
    /// Activity used by the dashboard's quick-start key.
    pub default_activity: ActivityLabel,
}

/// Demo login settings. These are demo strings, not secrets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    /// Accepted username.
    pub username: String,
    /// Accepted password.
    pub password: String,
    /// Display name shown after login.
    pub display_name: String,
    /// Simulated round-trip delay before the check, in milliseconds.
    pub delay_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Pretty,
            color: ColorSetting::Auto,
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            require_job_selection: true,
            default_activity: ActivityLabel::Work,
        }
    }
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            display_name: "Shop Manager".to_string(),
            delay_ms: 800,
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ShopError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ShopError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            ShopError::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), ShopError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| ShopError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            ShopError::Config(format!("Failed to write config file {}: {e}", path.display()))
        })
    }

    /// Render as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ShopError> {
        serde_yaml::to_string(self)
            .map_err(|e| ShopError::Config(format!("Failed to serialize config: {e}")))
    }

    /// Reject values the tracker cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.tracking.tick_interval_ms == 0 {
            return Err(ShopError::Config(
                "tracking.tick_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.login.username.trim().is_empty() {
            return Err(ShopError::Config("login.username must not be empty".to_string()));
        }
        Ok(())
    }
}

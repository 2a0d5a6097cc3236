//! Application configuration
//!
//! Read from a TOML file (default: `<config dir>/email-settings/config.toml`).
//! A missing file means defaults; a malformed one is an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::constants::{banner, gateway};
use crate::gateway::FailureMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub gateway: GatewaySettings,
    #[serde(default)]
    pub ui: UiSettings,
}

/// Simulated backend behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewaySettings {
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
    #[serde(default = "default_save_delay_ms")]
    pub save_delay_ms: u64,
    #[serde(default)]
    pub failure: FailureMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_banner_dismiss_ms")]
    pub banner_dismiss_ms: u64,
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_fetch_delay_ms() -> u64 {
    gateway::FETCH_DELAY_MS
}

fn default_save_delay_ms() -> u64 {
    gateway::SAVE_DELAY_MS
}

fn default_banner_dismiss_ms() -> u64 {
    banner::DISMISS_MS
}

fn default_window_width() -> f32 {
    crate::gui::constants::WINDOW_WIDTH
}

fn default_window_height() -> f32 {
    crate::gui::constants::WINDOW_HEIGHT
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            fetch_delay_ms: default_fetch_delay_ms(),
            save_delay_ms: default_save_delay_ms(),
            failure: FailureMode::Never,
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            banner_dismiss_ms: default_banner_dismiss_ms(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            gateway: GatewaySettings::default(),
            ui: UiSettings::default(),
        }
    }
}

impl GatewaySettings {
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_delay_ms)
    }
}

impl UiSettings {
    pub fn banner_timeout(&self) -> Duration {
        Duration::from_millis(self.banner_dismiss_ms)
    }
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load from `path`, or the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if !config_path.exists() {
            info!(path = %config_path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {:?}", config_path))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse TOML from {:?}", config_path))?;

        info!(path = %config_path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(contents)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Clamp values to safe ranges
    fn validate_and_clamp(&mut self) {
        if self.gateway.fetch_delay_ms > gateway::MAX_DELAY_MS {
            warn!(fetch_delay_ms = self.gateway.fetch_delay_ms, max = gateway::MAX_DELAY_MS, "fetch_delay_ms exceeds maximum, clamping");
            self.gateway.fetch_delay_ms = gateway::MAX_DELAY_MS;
        }

        if self.gateway.save_delay_ms > gateway::MAX_DELAY_MS {
            warn!(save_delay_ms = self.gateway.save_delay_ms, max = gateway::MAX_DELAY_MS, "save_delay_ms exceeds maximum, clamping");
            self.gateway.save_delay_ms = gateway::MAX_DELAY_MS;
        }

        if self.ui.banner_dismiss_ms < banner::MIN_DISMISS_MS {
            warn!(banner_dismiss_ms = self.ui.banner_dismiss_ms, min = banner::MIN_DISMISS_MS, "banner_dismiss_ms below minimum, clamping");
            self.ui.banner_dismiss_ms = banner::MIN_DISMISS_MS;
        } else if self.ui.banner_dismiss_ms > banner::MAX_DISMISS_MS {
            warn!(banner_dismiss_ms = self.ui.banner_dismiss_ms, max = banner::MAX_DISMISS_MS, "banner_dismiss_ms exceeds maximum, clamping");
            self.ui.banner_dismiss_ms = banner::MAX_DISMISS_MS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.ui.banner_timeout(), Duration::from_millis(5000));
        assert_eq!(config.gateway.fetch_delay(), Duration::from_millis(1000));
        assert_eq!(config.gateway.save_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r#"
            log_level = "debug"

            [gateway]
            save_delay_ms = 50
            failure = "save"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.gateway.save_delay_ms, 50);
        assert_eq!(config.gateway.fetch_delay_ms, 1000);
        assert_eq!(config.gateway.failure, FailureMode::Save);
        assert_eq!(config.ui, UiSettings::default());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let config = AppConfig::from_toml(
            r#"
            [gateway]
            fetch_delay_ms = 999999

            [ui]
            banner_dismiss_ms = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.gateway.fetch_delay_ms, gateway::MAX_DELAY_MS);
        assert_eq!(config.ui.banner_dismiss_ms, banner::MIN_DISMISS_MS);
    }

    #[test]
    fn test_invalid_failure_mode_is_an_error() {
        assert!(AppConfig::from_toml("[gateway]\nfailure = \"sometimes\"").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("email-settings-test-does-not-exist.toml");
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!("email-settings-test-{}.toml", std::process::id()));
        fs::write(&path, "[ui]\nbanner_dismiss_ms = 2500\n").unwrap();
        let config = AppConfig::load(Some(&path)).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(config.ui.banner_dismiss_ms, 2500);
    }
}

//! Editor configuration.
//!
//! Tunables for the spatial model and the interaction controller. Every field
//! has a default, so a partial JSON file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Smallest width/height a group may be resized to.
pub const DEFAULT_MIN_GROUP_SIZE: f64 = 40.0;
/// Default zoom range.
pub const DEFAULT_MIN_SCALE: f64 = 0.25;
pub const DEFAULT_MAX_SCALE: f64 = 3.0;
/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// How connections are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    /// Port-to-port cubic curves.
    #[default]
    Curved,
    /// Straight "quick links" between device centers.
    Straight,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Minimum group width/height in world units.
    pub min_group_size: f64,
    /// Lower bound for the canvas zoom factor.
    pub min_scale: f64,
    /// Upper bound for the canvas zoom factor.
    pub max_scale: f64,
    /// Hit tolerance for connections, in screen pixels (divided by zoom).
    pub hit_tolerance: f64,
    /// Radius around a port anchor that counts as a hit on the port.
    pub port_hit_radius: f64,
    /// Edge length of the square resize handle at a group's bottom-right corner.
    pub resize_handle_size: f64,
    /// Pointer travel (screen pixels) below which a press/release is a click.
    pub click_threshold: f64,
    /// Zoom factor applied per scroll notch.
    pub zoom_step: f64,
    /// Auto-save interval in seconds (0 disables auto-save).
    pub autosave_interval_secs: u64,
    /// How connections are drawn and hit-tested.
    pub link_style: LinkStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_group_size: DEFAULT_MIN_GROUP_SIZE,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            hit_tolerance: 6.0,
            port_hit_radius: 8.0,
            resize_handle_size: 12.0,
            click_threshold: 3.0,
            zoom_step: 1.1,
            autosave_interval_secs: DEFAULT_AUTOSAVE_INTERVAL_SECS,
            link_style: LinkStyle::Curved,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check ranges and floors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_group_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "minGroupSize must be positive, got {}",
                self.min_group_size
            )));
        }
        if !(self.min_scale > 0.0) || self.min_scale > self.max_scale {
            return Err(ConfigError::Invalid(format!(
                "scale range {}..{} is not a positive range",
                self.min_scale, self.max_scale
            )));
        }
        if self.hit_tolerance < 0.0 || self.port_hit_radius < 0.0 || self.click_threshold < 0.0 {
            return Err(ConfigError::Invalid("tolerances must not be negative".to_string()));
        }
        if !(self.zoom_step > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "zoomStep must be greater than 1, got {}",
                self.zoom_step
            )));
        }
        Ok(())
    }
}

//! Configuration file support for doodle-assist.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/doodle-assist/config.toml`. Settings include the style of new
//! shapes, the event log destination, default experiment context, and whether the
//! assistant runs automatically.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{AssistantConfig, DrawingConfig, ExperimentConfig, LoggingConfig};

use crate::draw::ShapeStyle;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// stroke_color = "black"
/// fill_color = [255, 240, 200]
/// hit_tolerance = 3.0
///
/// [logging]
/// enabled = true
/// events_path = "events.csv"
///
/// [experiment]
/// condition = "assist"
/// task_id = "cat"
/// trial_index = 1
///
/// [assistant]
/// auto_suggest = true
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Style of newly drawn shapes and hit-test slack
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Event log destination
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Initial experiment context for log records
    #[serde(default)]
    pub experiment: ExperimentConfig,

    /// Suggestion assistant behavior
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl Config {
    /// Validates and clamps configuration values to acceptable ranges.
    ///
    /// Invalid values are replaced by the nearest valid value (or the default)
    /// and a warning is logged.
    fn validate_and_clamp(&mut self) {
        // Hit tolerance: 0.0 - 20.0
        if !(0.0..=20.0).contains(&self.drawing.hit_tolerance) {
            log::warn!(
                "Invalid hit_tolerance {:.1}, clamping to 0.0-20.0 range",
                self.drawing.hit_tolerance
            );
            self.drawing.hit_tolerance = if self.drawing.hit_tolerance.is_nan() {
                DrawingConfig::default().hit_tolerance
            } else {
                self.drawing.hit_tolerance.clamp(0.0, 20.0)
            };
        }

        if self.logging.events_path.as_os_str().is_empty() {
            log::warn!("Empty logging.events_path, falling back to the default");
            self.logging.events_path = LoggingConfig::default().events_path;
        }
    }

    /// Style applied to shapes drawn with the configured colors.
    pub fn shape_style(&self) -> ShapeStyle {
        ShapeStyle::new(
            self.drawing.stroke_color.to_color(),
            self.drawing.fill_color.as_ref().map(ColorSpec::to_color),
        )
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("doodle-assist");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or the file
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

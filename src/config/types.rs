//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Drawing-related settings.
///
/// Controls the appearance of newly drawn shapes and how forgiving hit tests are.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Outline color - a named color or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_stroke_color")]
    pub stroke_color: ColorSpec,

    /// Interior color; leave unset for unfilled shapes
    #[serde(default)]
    pub fill_color: Option<ColorSpec>,

    /// Distance in scene units within which a click still hits a shape
    /// (valid range: 0.0 - 20.0)
    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            stroke_color: default_stroke_color(),
            fill_color: None,
            hit_tolerance: default_hit_tolerance(),
        }
    }
}

/// Event log settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LoggingConfig {
    /// Write the CSV event log
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// Destination CSV file; relative paths resolve against the working directory
    #[serde(default = "default_events_path")]
    pub events_path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            events_path: default_events_path(),
        }
    }
}

/// Experimental context stamped onto log records until changed at runtime.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExperimentConfig {
    /// Study condition label (e.g. "assist", "control")
    #[serde(default)]
    pub condition: Option<String>,

    /// Task identifier
    #[serde(default)]
    pub task_id: Option<String>,

    /// Trial number within the task
    #[serde(default)]
    pub trial_index: Option<u32>,
}

/// Suggestion assistant settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AssistantConfig {
    /// Query the assistant automatically after each completed shape
    #[serde(default = "default_auto_suggest")]
    pub auto_suggest: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            auto_suggest: default_auto_suggest(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_stroke_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_hit_tolerance() -> f64 {
    3.0
}

fn default_logging_enabled() -> bool {
    true
}

fn default_events_path() -> PathBuf {
    PathBuf::from("events.csv")
}

fn default_auto_suggest() -> bool {
    true
}

//! Configuration file support for promptly.
//!
//! Loads settings from ~/.config/promptly/config.toml if it exists,
//! otherwise uses sensible defaults.
//!
//! Also provides `BubbleConfig` - the runtime configuration struct with
//! validated geometry parameters.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::anchor::DEFAULT_DRAG_THRESHOLD;
use crate::placement::{PlacementEngine, DEFAULT_PADDING};
use crate::tracing::DEFAULT_MAX_ENTRIES;
use crate::types::Size;

// =============================================================================
// Runtime Configuration (validated values)
// =============================================================================

/// Runtime configuration with validated values.
///
/// Constructed from the file-based config types at startup; every field is
/// guaranteed finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BubbleConfig {
    /// Side length of the square anchor
    pub bubble_size: f64,
    /// Per-axis displacement that turns a press into a drag
    pub drag_threshold: f64,
    /// Initial gap between the anchor and the right visible edge
    pub start_margin: f64,
    /// Companion panel size
    pub panel_size: Size,
    /// Gap between anchor and panel
    pub panel_padding: f64,
    /// Inset used when clamping the panel into the visible area
    pub screen_margin: f64,
    /// Event tracer capacity
    pub trace_capacity: usize,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            bubble_size: 60.0,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            start_margin: 20.0,
            panel_size: Size::new(320.0, 260.0),
            panel_padding: DEFAULT_PADDING,
            screen_margin: 0.0,
            trace_capacity: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl BubbleConfig {
    pub fn placement_engine(&self) -> PlacementEngine {
        PlacementEngine::new(self.panel_padding, self.screen_margin)
    }
}

// =============================================================================
// File-based Configuration (TOML parsing)
// =============================================================================

/// Top-level configuration
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bubble: BubbleSection,
    pub panel: PanelSection,
    pub trace: TraceSection,
}

/// Anchor settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BubbleSection {
    pub size: f64,
    pub drag_threshold: f64,
    pub start_margin: f64,
}

/// Companion panel settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PanelSection {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub screen_margin: f64,
}

/// Event tracing settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TraceSection {
    pub capacity: usize,
}

impl Default for BubbleSection {
    fn default() -> Self {
        let d = BubbleConfig::default();
        Self {
            size: d.bubble_size,
            drag_threshold: d.drag_threshold,
            start_margin: d.start_margin,
        }
    }
}

impl Default for PanelSection {
    fn default() -> Self {
        let d = BubbleConfig::default();
        Self {
            width: d.panel_size.width,
            height: d.panel_size.height,
            padding: d.panel_padding,
            screen_margin: d.screen_margin,
        }
    }
}

impl Default for TraceSection {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl Config {
    /// Load config from default path (~/.config/promptly/config.toml)
    pub fn load() -> Self {
        Self::load_from_path(&Self::default_path())
    }

    /// Default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promptly")
            .join("config.toml")
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse config: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config file found at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    /// Resolve into runtime values, replacing anything invalid with defaults
    pub fn bubble_config(&self) -> BubbleConfig {
        let d = BubbleConfig::default();
        BubbleConfig {
            bubble_size: positive_or("bubble.size", self.bubble.size, d.bubble_size),
            drag_threshold: non_negative_or(
                "bubble.drag_threshold",
                self.bubble.drag_threshold,
                d.drag_threshold,
            ),
            start_margin: non_negative_or(
                "bubble.start_margin",
                self.bubble.start_margin,
                d.start_margin,
            ),
            panel_size: Size::new(
                positive_or("panel.width", self.panel.width, d.panel_size.width),
                positive_or("panel.height", self.panel.height, d.panel_size.height),
            ),
            panel_padding: non_negative_or("panel.padding", self.panel.padding, d.panel_padding),
            screen_margin: non_negative_or(
                "panel.screen_margin",
                self.panel.screen_margin,
                d.screen_margin,
            ),
            trace_capacity: if self.trace.capacity == 0 {
                log::warn!("trace.capacity must be at least 1, using {}", d.trace_capacity);
                d.trace_capacity
            } else {
                self.trace.capacity
            },
        }
    }
}

fn positive_or(key: &str, value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("Invalid {} = {}, using {}", key, value, default);
        default
    }
}

fn non_negative_or(key: &str, value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("Invalid {} = {}, using {}", key, value, default);
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_resolves_to_defaults() {
        let config = Config::default();
        assert_eq!(config.bubble_config(), BubbleConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
[bubble]
size = 48

[panel]
padding = 12
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let resolved = config.bubble_config();
        assert_eq!(resolved.bubble_size, 48.0);
        assert_eq!(resolved.panel_padding, 12.0);
        // Unset keys keep their defaults
        assert_eq!(resolved.drag_threshold, 3.0);
        assert_eq!(resolved.panel_size, Size::new(320.0, 260.0));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let toml = r#"
[bubble]
size = -1
drag_threshold = -3

[panel]
width = 0
screen_margin = -8

[trace]
capacity = 0
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.bubble_config(), BubbleConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("promptly-no-such-dir/config.toml");
        let config = Config::load_from_path(&path);
        assert_eq!(config.bubble_config(), BubbleConfig::default());
    }

    #[test]
    fn test_placement_engine_from_config() {
        let mut resolved = BubbleConfig::default();
        resolved.panel_padding = 4.0;
        resolved.screen_margin = 2.0;
        assert_eq!(resolved.placement_engine(), PlacementEngine::new(4.0, 2.0));
    }
}

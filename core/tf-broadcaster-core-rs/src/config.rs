use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use crate::event::Axis;

pub const APP_NAME: &str = "tf-broadcaster";
pub const FRAME_ID: &str = "parent_frame_id";
pub const CHILD_FRAME_ID: &str = "child_frame_id";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct RangeConfig {
    pub min: f64,
    pub max: f64,
    pub initial: f64,
}

impl RangeConfig {
    pub const POSITION: RangeConfig = RangeConfig {
        min: -10.0,
        max: 10.0,
        initial: 0.0,
    };

    pub const ORIENTATION: RangeConfig = RangeConfig {
        min: -180.0,
        max: 180.0,
        initial: 0.0,
    };
}

/// Range table where every key may be left out
#[derive(Deserialize, Default)]
#[serde(default)]
struct PartialRange {
    min: Option<f64>,
    max: Option<f64>,
    initial: Option<f64>,
}

impl PartialRange {
    fn or(self, defaults: RangeConfig) -> RangeConfig {
        RangeConfig {
            min: self.min.unwrap_or(defaults.min),
            max: self.max.unwrap_or(defaults.max),
            initial: self.initial.unwrap_or(defaults.initial),
        }
    }
}

fn position_range<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RangeConfig, D::Error> {
    PartialRange::deserialize(deserializer).map(|range| range.or(RangeConfig::POSITION))
}

fn orientation_range<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<RangeConfig, D::Error> {
    PartialRange::deserialize(deserializer).map(|range| range.or(RangeConfig::ORIENTATION))
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    /// Tick period of the panel in milliseconds
    pub tick_interval_ms: u64,
    pub frame_id: String,
    pub child_frame_id: String,
    /// Range of the x, y and z sliders
    #[serde(deserialize_with = "position_range")]
    pub position: RangeConfig,
    /// Range of the roll, pitch and yaw sliders in degrees
    #[serde(deserialize_with = "orientation_range")]
    pub orientation: RangeConfig,
}

impl PanelConfig {
    pub fn range(&self, axis: Axis) -> &RangeConfig {
        if axis.is_angular() {
            &self.orientation
        } else {
            &self.position
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            tick_interval_ms: 10,
            frame_id: FRAME_ID.to_string(),
            child_frame_id: CHILD_FRAME_ID.to_string(),
            position: RangeConfig::POSITION,
            orientation: RangeConfig::ORIENTATION,
        }
    }
}

pub fn get_config() -> Result<PanelConfig, confy::ConfyError> {
    let config = confy::load(APP_NAME, "panel");
    match config {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!("Error loading config: {:?}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(name: &str, contents: &str) -> PanelConfig {
        let path = std::env::temp_dir().join(format!(
            "tf-broadcaster-config-{}-{}.toml",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        let config = confy::load_path(&path);
        let _ = std::fs::remove_file(path);
        config.unwrap()
    }

    #[test]
    fn test_partial_range_keeps_other_defaults() {
        let config = load(
            "partial",
            "[position]\nmax = 5.0\n\n[orientation]\ninitial = 45.0\n",
        );
        assert_eq!(
            config.position,
            RangeConfig {
                min: -10.0,
                max: 5.0,
                initial: 0.0
            }
        );
        assert_eq!(
            config.orientation,
            RangeConfig {
                min: -180.0,
                max: 180.0,
                initial: 45.0
            }
        );
        assert_eq!(config.tick_interval_ms, 10);
    }

    #[test]
    fn test_missing_ranges_use_defaults() {
        let config = load("missing", "tick_interval_ms = 25\n");
        assert_eq!(config.tick_interval_ms, 25);
        assert_eq!(config.position, RangeConfig::POSITION);
        assert_eq!(config.orientation, RangeConfig::ORIENTATION);
    }

    #[test]
    fn test_range_per_axis() {
        let config = PanelConfig::default();
        assert_eq!(config.range(Axis::Z), &RangeConfig::POSITION);
        assert_eq!(config.range(Axis::Pitch), &RangeConfig::ORIENTATION);
    }
}

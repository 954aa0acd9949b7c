//! Engine Configuration
//!
//! Every tunable of the loop in one serde struct. `Default` reproduces the
//! shipped game; a JSON file can override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::vec2::Vec2;
use crate::game::interaction::InRangePolicy;
use crate::{FRAME_HOLD, MOVE_STEP, TILE_SIZE, WALK_FRAMES};

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// File was not valid config JSON.
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value was out of range.
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Image paths for the background and the four walking sheets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    /// Full map image
    pub background: String,
    /// Sheet shown while facing up
    pub player_up: String,
    /// Sheet shown while facing left
    pub player_left: String,
    /// Sheet shown while facing down (also the initial sheet)
    pub player_down: String,
    /// Sheet shown while facing right
    pub player_right: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            background: "assets/ecoquest-map.png".to_string(),
            player_up: "assets/player-up.png".to_string(),
            player_left: "assets/player-left.png".to_string(),
            player_down: "assets/player-down.png".to_string(),
            player_right: "assets/player-right.png".to_string(),
        }
    }
}

/// How tile layers map onto screen coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapLayout {
    /// Tiles per row in every layer
    pub columns: usize,
    /// Tile edge length in pixels (obstacles and items are this size)
    pub tile_size: f32,
    /// Screen position of the map's top-left corner at start
    pub offset: Vec2,
    /// Extra shift applied to every tile-derived rectangle
    pub tile_inset: f32,
    /// Collision layer code for a blocking tile
    pub collision_code: u32,
    /// Object layer code for an item slot
    pub item_code: u32,
    /// Max per-axis distance for matching a zone record to a slot by position
    pub zone_tolerance: f32,
}

impl Default for MapLayout {
    fn default() -> Self {
        Self {
            columns: 50,
            tile_size: TILE_SIZE,
            offset: Vec2::new(-60.0, -400.0),
            tile_inset: 30.0,
            collision_code: 193,
            item_code: 430,
            zone_tolerance: 16.0,
        }
    }
}

/// Configuration for the game loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Drawing surface width
    pub canvas_width: f32,
    /// Drawing surface height
    pub canvas_height: f32,
    /// World scroll per frame while walking
    pub move_step: f32,
    /// Frames each walking frame is held for
    pub frame_hold: u32,
    /// Frames in a walking sheet
    pub walk_frames: u32,
    /// Full walking sheet size (all frames side by side)
    pub player_sheet_size: Vec2,
    /// Player size before the sheet reports its real size
    pub default_player_size: Vec2,
    /// How the single in-range item is picked when several overlap
    pub in_range_policy: InRangePolicy,
    /// Image paths
    pub assets: AssetPaths,
    /// Tile layer layout
    pub layout: MapLayout,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1024.0,
            canvas_height: 576.0,
            move_step: MOVE_STEP,
            frame_hold: FRAME_HOLD,
            walk_frames: WALK_FRAMES,
            player_sheet_size: Vec2::new(192.0, 68.0),
            default_player_size: Vec2::new(48.0, 68.0),
            in_range_policy: InRangePolicy::default(),
            assets: AssetPaths::default(),
            layout: MapLayout::default(),
        }
    }
}

impl EngineConfig {
    /// Parse from JSON text and validate.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file and validate.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Reject values that would break the loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_hold == 0 {
            return Err(ConfigError::Invalid("frame_hold must be at least 1".into()));
        }
        if self.walk_frames == 0 {
            return Err(ConfigError::Invalid("walk_frames must be at least 1".into()));
        }
        if self.layout.columns == 0 {
            return Err(ConfigError::Invalid("layout.columns must be at least 1".into()));
        }
        if !(self.move_step.is_finite() && self.move_step >= 0.0) {
            return Err(ConfigError::Invalid(format!("move_step {} out of range", self.move_step)));
        }
        if !(self.layout.tile_size.is_finite() && self.layout.tile_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "layout.tile_size {} out of range",
                self.layout.tile_size
            )));
        }

        let finite = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("player_sheet_size.x", self.player_sheet_size.x),
            ("player_sheet_size.y", self.player_sheet_size.y),
            ("default_player_size.x", self.default_player_size.x),
            ("default_player_size.y", self.default_player_size.y),
            ("layout.offset.x", self.layout.offset.x),
            ("layout.offset.y", self.layout.offset.y),
            ("layout.tile_inset", self.layout.tile_inset),
            ("layout.zone_tolerance", self.layout.zone_tolerance),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{} must be finite, got {}", name, value)));
        }
        Ok(())
    }

    /// Fixed on-screen position of the player sprite.
    ///
    /// Centred on the canvas using the sheet's single-frame width.
    pub fn player_position(&self) -> Vec2 {
        let frame_width = self.player_sheet_size.x / self.walk_frames as f32;
        Vec2::new(
            self.canvas_width / 2.0 - frame_width / 2.0,
            self.canvas_height / 2.0 - self.player_sheet_size.y / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_player_position() {
        let config = EngineConfig::default();
        // 1024/2 - 192/8, 576/2 - 68/2
        assert_eq!(config.player_position(), Vec2::new(488.0, 254.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "move_step": 4.0, "layout": { "columns": 10 } }"#).unwrap();
        assert_eq!(config.move_step, 4.0);
        assert_eq!(config.layout.columns, 10);
        assert_eq!(config.layout.collision_code, 193);
        assert_eq!(config.frame_hold, FRAME_HOLD);
        assert_eq!(config.in_range_policy, InRangePolicy::LastChecked);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "frame_hold": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "layout": { "columns": 0 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_non_finite_geometry_rejected() {
        let mut config = EngineConfig::default();
        config.layout.tile_size = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EngineConfig::default();
        config.layout.tile_size = f32::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EngineConfig::default();
        config.player_sheet_size = Vec2::new(f32::NAN, 68.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EngineConfig::default();
        config.layout.offset = Vec2::new(0.0, f32::NEG_INFINITY);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_policy_from_json() {
        let config = EngineConfig::from_json(r#"{ "in_range_policy": "nearest" }"#).unwrap();
        assert_eq!(config.in_range_policy, InRangePolicy::Nearest);
    }
}

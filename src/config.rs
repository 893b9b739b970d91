//! Game configuration
//!
//! Every section has sensible defaults, so a config file only needs to list
//! the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Error;
use crate::core::types::Result;

/// Grid snapping and placement validation parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Lattice spacing for snapped positions
    pub grid_size: f32,
    /// Height change per raise/lower key press
    pub height_increment: f32,
    /// Broad-phase radius for no-build-zone candidates
    pub zone_search_radius: f32,
    /// Maximum pointer ray length
    pub max_ray_distance: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            grid_size: 0.5,
            height_increment: 0.125,
            zone_search_radius: 10.0,
            max_ray_distance: f32::MAX,
        }
    }
}

/// Floor tile painting and mesh merging parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    /// Vertices closer than this are merged
    pub weld_threshold: f32,
    /// Offset above the hit floor to avoid z-fighting
    pub hover_height: f32,
    /// Drop collapsed triangles after welding (off: merged meshes keep them)
    pub drop_degenerate_triangles: bool,
    /// Edge length of painted floor tiles
    pub tile_size: f32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            weld_threshold: 0.01,
            hover_height: 0.01,
            drop_degenerate_triangles: false,
            tile_size: 1.0,
        }
    }
}

/// Free-fly build camera speeds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildCamConfig {
    pub move_speed: f32,
    pub vertical_speed: f32,
    /// Degrees per pixel of mouse movement
    pub look_speed: f32,
}

impl Default for BuildCamConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            vertical_speed: 3.0,
            look_speed: 3.0,
        }
    }
}

/// Material names looked up once when the visual table is built
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualNames {
    pub ghost: String,
    pub blocked: String,
    pub no_build_zone: String,
}

impl Default for VisualNames {
    fn default() -> Self {
        Self {
            ghost: "GhostMaterial".to_string(),
            blocked: "NoBuildMaterial".to_string(),
            no_build_zone: "NoBuildZone".to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub placement: PlacementConfig,
    pub floor: FloorConfig,
    pub camera: BuildCamConfig,
    pub visuals: VisualNames,
    pub starting_money: f32,
}

impl GameConfig {
    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: GameConfig = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the placement math cannot work with
    pub fn validate(&self) -> Result<()> {
        let p = &self.placement;
        if !(p.grid_size.is_finite() && p.grid_size > 0.0) {
            return Err(Error::Config(format!("grid_size must be positive, got {}", p.grid_size)));
        }
        if !(p.height_increment.is_finite() && p.height_increment > 0.0) {
            return Err(Error::Config(format!(
                "height_increment must be positive, got {}",
                p.height_increment
            )));
        }
        if !(p.zone_search_radius >= 0.0) {
            return Err(Error::Config(format!(
                "zone_search_radius must not be negative, got {}",
                p.zone_search_radius
            )));
        }
        if !(self.floor.weld_threshold >= 0.0) {
            return Err(Error::Config(format!(
                "weld_threshold must not be negative, got {}",
                self.floor.weld_threshold
            )));
        }
        if !(self.floor.tile_size.is_finite() && self.floor.tile_size > 0.0) {
            return Err(Error::Config(format!("tile_size must be positive, got {}", self.floor.tile_size)));
        }
        Ok(())
    }
}

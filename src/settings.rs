//! Generator settings
//!
//! Everything a run needs except the seed. Stored as JSON; missing fields
//! fall back to a 1280x720 Pathetic map with the stock loop-removal tunables.

use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

use crate::consts::{ESCAPE_ANGLE, LOOP_WINDOW_RADIUS, RESOLVER_PASSES};
use crate::error::MapError;
use crate::map::{Difficulty, LoopResolver, Resolution};

/// Loop-removal tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopSettings {
    /// Segments checked on each side of a segment
    pub window_radius: usize,
    /// Turn angle for replacement points (radians)
    pub escape_angle: f64,
    /// Scan/rebuild passes
    pub passes: usize,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            window_radius: LOOP_WINDOW_RADIUS,
            escape_angle: ESCAPE_ANGLE,
            passes: RESOLVER_PASSES,
        }
    }
}

/// Map generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Output size; width is also the number of output points
    pub resolution: Resolution,
    pub difficulty: Difficulty,
    /// Fixed starting height (random in `[H/4, 3H/5)` when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_y: Option<f64>,
    pub loops: LoopSettings,
}

impl GeneratorSettings {
    /// Default settings at a given difficulty
    pub fn from_preset(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Switch difficulty, keeping everything else
    pub fn apply_preset(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn loop_resolver(&self) -> LoopResolver {
        LoopResolver {
            window_radius: self.loops.window_radius,
            escape_angle: self.loops.escape_angle,
            passes: self.loops.passes,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, MapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded generator settings from {}", path.display());
        Ok(settings)
    }
}

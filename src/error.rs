//! Error type shared by every generation stage

use thiserror::Error;

/// Everything that can stop a map from being generated
#[derive(Debug, Error)]
pub enum MapError {
    /// Difficulty name or code outside the tier table
    #[error("unknown difficulty tier: {0}")]
    UnknownDifficulty(String),

    /// Too few distinct points survived loop removal to fit a cubic curve
    #[error("need at least 4 distinct points to fit the terrain curve, got {points}")]
    DegenerateInput { points: usize },

    #[error("resolution {width}x{height} is too small (need width >= 4 and height >= 50)")]
    InvalidResolution { width: u32, height: u32 },

    #[error("starting y {y} is outside the playable band [0, {max}]")]
    InvalidStartingY { y: f64, max: f64 },

    /// Seed argument that is not an unsigned 64-bit integer
    #[error("invalid seed {0}")]
    InvalidSeed(String),

    #[error("invalid generator settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("failed to read generator settings: {0}")]
    Io(#[from] std::io::Error),
}

//! Terrain Backbone - procedural 2D terrain paths for scrolling levels
//!
//! Core modules:
//! - `map`: Deterministic path generation (random walk, loop removal, curve fit)
//! - `settings`: Serializable generator configuration
//! - `error`: Failure cases shared by every stage

pub mod error;
pub mod map;
pub mod settings;

pub use error::MapError;
pub use map::{Difficulty, MapBuilder, Path, Point, Resolution, RngState, generate_map};
pub use settings::GeneratorSettings;

/// Generator constants
pub mod consts {
    use std::f64::consts::PI;

    /// Probability of a backward step in the random walk
    pub const BACKWARD_STEP_PROBABILITY: f64 = 0.3;
    /// Walk points stay this far below the vertical resolution
    pub const TOP_MARGIN: f64 = 20.0;

    /// Segments checked on each side during loop removal
    pub const LOOP_WINDOW_RADIUS: usize = 40;
    /// Turn angle for points appended by loop removal, whatever the tier
    pub const ESCAPE_ANGLE: f64 = 3.0 * PI / 4.0;
    /// Loop removal always runs this many passes
    pub const RESOLVER_PASSES: usize = 3;

    /// Cubic interpolation needs at least this many distinct points
    pub const MIN_SPLINE_POINTS: usize = 4;
    /// Smallest height whose default start band `[H/4, 3H/5)` fits under the top margin
    pub const MIN_HEIGHT: u32 = 50;
}

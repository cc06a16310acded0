//! Terrain backbone generation
//!
//! Pipeline: difficulty profile -> random walk -> loop removal (fixed number
//! of passes) -> cubic curve resampling. All randomness comes from the
//! builder's own seeded PCG32 stream.

pub mod builder;
pub mod difficulty;
pub mod loops;
pub mod path;
pub mod spline;
pub mod walk;

pub use builder::{MapBuilder, Resolution, RngState, generate_map};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use loops::{LoopResolver, RepairPlan, count_crossings, is_crossing, segments_cross};
pub use path::{Path, Point};
pub use spline::{CubicCurve, resample};
pub use walk::Walker;

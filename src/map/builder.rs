//! Map generation pipeline and reproducible RNG state
//!
//! The builder owns its own PCG32 stream; there is no process-wide RNG. A run
//! either restores the caller's [`RngState`] or snapshots the current one
//! first, and returns it so the exact same map can be generated again.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::loops::LoopResolver;
use super::path::{Path, Point};
use super::spline;
use super::walk::Walker;
use crate::consts::{MIN_HEIGHT, MIN_SPLINE_POINTS, TOP_MARGIN};
use crate::error::MapError;
use crate::settings::GeneratorSettings;

/// Opaque snapshot of the generator's full internal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    rng: Pcg32,
}

impl RngState {
    /// State of a generator seeded from a plain integer
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn to_rng(&self) -> Pcg32 {
        self.rng.clone()
    }
}

/// Output size in coordinate units; `width` is also the output point count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Highest y a walk point may take
    pub fn y_limit(&self) -> f64 {
        self.height as f64 - TOP_MARGIN
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if (self.width as usize) < MIN_SPLINE_POINTS || self.height < MIN_HEIGHT {
            return Err(MapError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Generates terrain backbones from a private PCG32 stream
#[derive(Debug, Clone)]
pub struct MapBuilder {
    rng: Pcg32,
}

impl MapBuilder {
    /// Builder seeded from a plain integer
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Builder seeded from the thread-local entropy source
    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg32::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_state(state: &RngState) -> Self {
        Self {
            rng: state.to_rng(),
        }
    }

    /// Capture the current generator state
    pub fn snapshot(&self) -> RngState {
        RngState {
            rng: self.rng.clone(),
        }
    }

    /// Rewind (or fast-forward) the generator to a captured state
    pub fn restore(&mut self, state: &RngState) {
        self.rng = state.to_rng();
    }

    /// Generate a terrain backbone
    ///
    /// With `seed` the generator is restored to it first; without, the current
    /// state is captured. Either way the state the run started from is
    /// returned, and passing it back with the same other arguments reproduces
    /// the path exactly.
    ///
    /// Loop removal is best-effort: the returned path may still cross itself.
    pub fn generate(
        &mut self,
        seed: Option<&RngState>,
        difficulty: Difficulty,
        starting_y: Option<f64>,
        resolution: Resolution,
    ) -> Result<(Path, RngState), MapError> {
        self.run(
            seed,
            difficulty,
            starting_y,
            resolution,
            &LoopResolver::default(),
        )
    }

    /// Generate from a settings value, including its loop-removal tunables
    pub fn generate_with(
        &mut self,
        settings: &GeneratorSettings,
        seed: Option<&RngState>,
    ) -> Result<(Path, RngState), MapError> {
        self.run(
            seed,
            settings.difficulty,
            settings.starting_y,
            settings.resolution,
            &settings.loop_resolver(),
        )
    }

    /// Walk and loop removal only, without the final curve fit
    ///
    /// Consumes randomness exactly like the first stages of [`Self::generate`].
    pub fn backbone(
        &mut self,
        difficulty: Difficulty,
        starting_y: Option<f64>,
        resolution: Resolution,
        resolver: &LoopResolver,
    ) -> Result<Path, MapError> {
        resolution.validate()?;
        if let Some(y) = starting_y {
            let max = resolution.y_limit();
            if !(y.is_finite() && (0.0..=max).contains(&y)) {
                return Err(MapError::InvalidStartingY { y, max });
            }
        }

        let profile = difficulty.profile(resolution.width);
        let height = resolution.height as f64;
        let walker = Walker::new(profile.step, profile.angle_range, height);

        let start_y = match starting_y {
            Some(y) => y,
            None => self.rng.random_range(height / 4.0..height * 3.0 / 5.0),
        };

        let mut path = walker.walk(
            &mut self.rng,
            Point::new(0.0, start_y),
            resolution.width as f64,
        );
        log::debug!(
            "{} walk: step {:.3}, {} raw points from y {:.1}",
            difficulty,
            profile.step,
            path.len(),
            start_y
        );

        resolver.resolve(&mut path, &walker, &mut self.rng);
        Ok(path)
    }

    fn run(
        &mut self,
        seed: Option<&RngState>,
        difficulty: Difficulty,
        starting_y: Option<f64>,
        resolution: Resolution,
        resolver: &LoopResolver,
    ) -> Result<(Path, RngState), MapError> {
        let seed_used = match seed {
            Some(state) => {
                self.restore(state);
                state.clone()
            }
            None => self.snapshot(),
        };

        let backbone = self.backbone(difficulty, starting_y, resolution, resolver)?;
        let path = spline::resample(&backbone, resolution.width as usize)?;

        log::info!(
            "Generated {} map: {} points at {}x{}",
            difficulty,
            path.len(),
            resolution.width,
            resolution.height
        );
        Ok((path, seed_used))
    }
}

/// One-shot generation with a freshly entropy-seeded builder
pub fn generate_map(
    seed: Option<&RngState>,
    difficulty: Difficulty,
    starting_y: Option<f64>,
    resolution: Resolution,
) -> Result<(Path, RngState), MapError> {
    MapBuilder::from_entropy().generate(seed, difficulty, starting_y, resolution)
}

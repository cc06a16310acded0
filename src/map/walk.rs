//! Constrained random walk producing the raw terrain points
//!
//! Each step only looks at the previous point and the fixed parameters:
//! - x moves by exactly `step`, backwards with probability 0.3 unless that
//!   would cross x = 0
//! - y is drawn uniformly from a band whose height grows with the turn angle,
//!   clamped to `[0, height - TOP_MARGIN]`

use rand::Rng;

use super::path::{Path, Point};
use crate::consts::{BACKWARD_STEP_PROBABILITY, TOP_MARGIN};

/// Fixed parameters of one walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walker {
    /// Horizontal distance of every step
    pub step: f64,
    /// Maximum turn angle (radians) used for regular steps
    pub angle_range: f64,
    /// Vertical resolution
    pub height: f64,
}

impl Walker {
    pub fn new(step: f64, angle_range: f64, height: f64) -> Self {
        Self {
            step,
            angle_range,
            height,
        }
    }

    /// Highest y a generated point may take
    #[inline]
    pub fn y_limit(&self) -> f64 {
        self.height - TOP_MARGIN
    }

    /// Vertical band `[ymin, ymax]` reachable from `prev` with turn angle `alpha`
    pub fn y_band(&self, prev: Point, alpha: f64) -> (f64, f64) {
        let y_range = 2.0 * self.step * (alpha / 2.0).tan();
        let ymin = (prev.y - y_range / 2.0).max(0.0);
        let ymax = (prev.y + y_range / 2.0).min(self.y_limit());
        (ymin, ymax)
    }

    /// Next point using the walker's own angle range
    pub fn next_point<R: Rng + ?Sized>(&self, rng: &mut R, prev: Point) -> Point {
        self.next_point_with_angle(rng, prev, self.angle_range)
    }

    /// Next point with an explicit turn angle (the loop resolver uses a wider
    /// escape angle than the active difficulty)
    pub fn next_point_with_angle<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        prev: Point,
        alpha: f64,
    ) -> Point {
        let (ymin, ymax) = self.y_band(prev, alpha);

        let p: f64 = rng.random();
        let x = if p >= BACKWARD_STEP_PROBABILITY || prev.x <= self.step {
            prev.x + self.step
        } else {
            prev.x - self.step
        };

        let y = if ymax > ymin {
            rng.random_range(ymin..=ymax)
        } else {
            ymin
        };

        Point::new(x, y)
    }

    /// Walk from `start` until a point reaches `x >= width`
    pub fn walk<R: Rng + ?Sized>(&self, rng: &mut R, start: Point, width: f64) -> Path {
        let mut path = Path::new(start);
        if !(self.step > 0.0 && self.step.is_finite()) {
            log::warn!("Refusing to walk with step {}", self.step);
            return path;
        }

        let mut point = start;
        while point.x < width {
            point = self.next_point(rng, point);
            path.push(point);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Difficulty;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f64::consts::PI;

    #[test]
    fn test_zero_angle_keeps_y_flat() {
        let walker = Walker::new(2.0, 0.0, 720.0);
        let mut rng = Pcg32::seed_from_u64(7);
        let path = walker.walk(&mut rng, Point::new(0.0, 300.0), 200.0);
        assert!(path.iter().all(|p| p.y == 300.0));
        assert!(path.last().unwrap().x >= 200.0);
    }

    #[test]
    fn test_never_steps_below_zero_x() {
        let walker = Walker::new(10.0, PI / 4.0, 720.0);
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..500 {
            let next = walker.next_point(&mut rng, Point::new(10.0, 300.0));
            assert_eq!(next.x, 20.0);
        }
    }

    #[test]
    fn test_backward_steps_happen() {
        let walker = Walker::new(10.0, PI / 4.0, 720.0);
        let mut rng = Pcg32::seed_from_u64(2);
        let backward = (0..1000)
            .filter(|_| walker.next_point(&mut rng, Point::new(500.0, 300.0)).x < 500.0)
            .count();
        // ~30% expected
        assert!(backward > 200 && backward < 400, "backward = {backward}");
    }

    #[test]
    fn test_band_clamps_at_edges() {
        let walker = Walker::new(100.0, 3.0 * PI / 4.0, 720.0);
        let (lo, _) = walker.y_band(Point::new(0.0, 5.0), walker.angle_range);
        assert_eq!(lo, 0.0);
        let (_, hi) = walker.y_band(Point::new(0.0, 690.0), walker.angle_range);
        assert_eq!(hi, 700.0);
    }

    #[test]
    fn test_walk_terminates_past_width() {
        let walker = Walker::new(12.8, 15.0 * PI / 18.0, 720.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let path = walker.walk(&mut rng, Point::new(0.0, 360.0), 1280.0);
        assert!(path.last().unwrap().x >= 1280.0);
        // every earlier point is still short of the width
        let n = path.len();
        assert!(path.points()[..n - 1].iter().all(|p| p.x < 1280.0));
    }

    #[test]
    fn test_non_positive_step_returns_start_only() {
        let walker = Walker::new(0.0, 0.0, 720.0);
        let mut rng = Pcg32::seed_from_u64(4);
        let path = walker.walk(&mut rng, Point::new(0.0, 100.0), 1280.0);
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_pathetic_steps_are_exact() {
        let profile = Difficulty::Pathetic.profile(1280);
        let walker = Walker::new(profile.step, profile.angle_range, 720.0);
        assert_eq!(walker.step, 2.0);

        for seed in 0..16 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let path = walker.walk(&mut rng, Point::new(0.0, 250.0), 1280.0);
            for (a, b) in path.segments() {
                assert_eq!((b.x - a.x).abs(), 2.0);
                assert_eq!(b.y, 250.0);
            }
            assert_eq!(path.last().unwrap().x, 1280.0);
        }
    }

    proptest! {
        #[test]
        fn prop_steps_and_clamp(
            seed in any::<u64>(),
            step in 1.0f64..80.0,
            angle in 0.0f64..(16.0 * PI / 18.0),
            start_frac in 0.0f64..1.0,
        ) {
            let height = 720.0;
            let walker = Walker::new(step, angle, height);
            let start = Point::new(0.0, start_frac * walker.y_limit());
            let mut rng = Pcg32::seed_from_u64(seed);
            let path = walker.walk(&mut rng, start, 640.0);

            for (a, b) in path.segments() {
                let dx = (b.x - a.x).abs();
                // Fractional steps drift by float rounding once x grows
                prop_assert!((dx - step).abs() < 1e-9);
                prop_assert!(dx > 0.0);
            }
            for p in path.iter() {
                prop_assert!(p.y >= 0.0 && p.y <= walker.y_limit());
                prop_assert!(p.x >= 0.0);
            }
        }
    }
}

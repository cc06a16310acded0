//! Best-effort removal of self-crossings from a raw walk
//!
//! A random walk that is allowed to step backwards can fold over itself. Each
//! pass scans a bounded window around every segment and, for every neighbour
//! that crosses it, drops the point that currently ends the segment. The dropped
//! points are replaced by fresh walk steps appended at the tail, so a pass
//! never changes the number of points.
//!
//! This is a fixed-iteration heuristic. The output is NOT guaranteed to be
//! free of self-intersections; callers that need that must validate the path
//! themselves.

use rand::Rng;

use super::path::{Path, Point};
use super::walk::Walker;
use crate::consts::{ESCAPE_ANGLE, LOOP_WINDOW_RADIUS, RESOLVER_PASSES};

/// Strict counter-clockwise orientation of `a -> b -> c`
#[inline]
fn ccw(a: Point, b: Point, c: Point) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// Whether segment `ab` crosses segment `cd`
///
/// Collinear segments never cross. Segments sharing an endpoint register as
/// crossing when the far endpoint lies strictly counter-clockwise of the other
/// segment.
#[inline]
pub fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    ccw(a, c, d) != ccw(b, c, d) && ccw(a, b, c) != ccw(a, b, d)
}

/// Whether segments `i` and `j` of `points` cross
///
/// A segment never crosses itself, and out-of-range indices are treated as
/// no crossing.
pub fn is_crossing(points: &[Point], i: usize, j: usize) -> bool {
    if i == j {
        return false;
    }
    match (
        points.get(i),
        points.get(i + 1),
        points.get(j),
        points.get(j + 1),
    ) {
        (Some(&a), Some(&b), Some(&c), Some(&d)) => segments_cross(a, b, c, d),
        _ => false,
    }
}

/// Number of crossing segment pairs `(i, j)`, `i < j <= i + window`
pub fn count_crossings(points: &[Point], window: usize) -> usize {
    let segments = points.len().saturating_sub(1);
    (0..segments)
        .map(|i| {
            let hi = (i + window).min(segments.saturating_sub(1));
            (i + 1..=hi).filter(|&j| is_crossing(points, i, j)).count()
        })
        .sum()
}

/// Segment `k` of the surviving points, as listed by `alive`
#[inline]
fn survivor_segment(points: &[Point], alive: &[usize], k: usize) -> (Point, Point) {
    (points[alive[k]], points[alive[k + 1]])
}

/// Point indices one pass will delete, ascending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairPlan {
    removed: Vec<usize>,
}

impl RepairPlan {
    pub fn removed(&self) -> &[usize] {
        &self.removed
    }

    pub fn len(&self) -> usize {
        self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Windowed loop remover
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopResolver {
    /// Neighbour segments checked on each side of a segment
    pub window_radius: usize,
    /// Turn angle used for replacement points
    pub escape_angle: f64,
    /// Number of scan/rebuild passes
    pub passes: usize,
}

impl Default for LoopResolver {
    fn default() -> Self {
        Self {
            window_radius: LOOP_WINDOW_RADIUS,
            escape_angle: ESCAPE_ANGLE,
            passes: RESOLVER_PASSES,
        }
    }
}

impl LoopResolver {
    /// Find the points to delete, without touching the sequence
    ///
    /// Segments are taken between surviving points and visited left to
    /// right. Every neighbour in `[i - R, i + R]` that crosses segment `i`
    /// deletes the point that currently ends it, so segment `i` is bridged
    /// to the next survivor and the remaining neighbours are tested against
    /// the bridge. Window positions count surviving points only.
    pub fn scan(&self, points: &[Point]) -> RepairPlan {
        let mut alive: Vec<usize> = (0..points.len()).collect();
        let mut removed = Vec::new();

        let mut i = 0;
        while i + 1 < alive.len() {
            let mut j = i.saturating_sub(self.window_radius);
            while i + 1 < alive.len() && j <= (i + self.window_radius).min(alive.len() - 2) {
                if j != i {
                    let (a, b) = survivor_segment(points, &alive, i);
                    let (c, d) = survivor_segment(points, &alive, j);
                    if segments_cross(a, b, c, d) {
                        removed.push(alive.remove(i + 1));
                    }
                }
                j += 1;
            }
            i += 1;
        }

        removed.sort_unstable();
        RepairPlan { removed }
    }

    /// Apply a plan: drop the scheduled points, then append one escape step
    /// per dropped point at the tail
    pub fn rebuild<R: Rng + ?Sized>(
        &self,
        points: &[Point],
        plan: &RepairPlan,
        walker: &Walker,
        rng: &mut R,
    ) -> Vec<Point> {
        let mut rebuilt: Vec<Point> = points
            .iter()
            .enumerate()
            .filter(|(idx, _)| plan.removed.binary_search(idx).is_err())
            .map(|(_, p)| *p)
            .collect();

        for _ in 0..plan.len() {
            // Start point is never scheduled, so rebuilt is never empty
            let Some(&last) = rebuilt.last() else {
                break;
            };
            rebuilt.push(walker.next_point_with_angle(rng, last, self.escape_angle));
        }
        rebuilt
    }

    /// One scan/rebuild pass over `path`; returns the number of points replaced
    pub fn resolve_pass<R: Rng + ?Sized>(
        &self,
        path: &mut Path,
        walker: &Walker,
        rng: &mut R,
    ) -> usize {
        let plan = self.scan(path.points());
        if plan.is_empty() {
            return 0;
        }
        let rebuilt = self.rebuild(path.points(), &plan, walker, rng);
        path.replace(rebuilt);
        plan.len()
    }

    /// Run every configured pass, regardless of whether crossings remain
    pub fn resolve<R: Rng + ?Sized>(&self, path: &mut Path, walker: &Walker, rng: &mut R) {
        for pass in 0..self.passes {
            let replaced = self.resolve_pass(path, walker, rng);
            log::debug!(
                "Loop pass {}: replaced {} of {} points",
                pass + 1,
                replaced,
                path.len()
            );
        }
    }
}

//! Point and path containers
//!
//! A path is kept in generation order, not coordinate order: the random walk
//! may step backwards, so x is not monotonic until the curve is resampled.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A single terrain vertex
pub type Point = DVec2;

/// Ordered sequence of terrain vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Start a new path at the given point
    pub fn new(start: Point) -> Self {
        Self {
            points: vec![start],
        }
    }

    /// Build a path from an existing point list
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build a path from parallel coordinate columns (extra values on the
    /// longer side are ignored)
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Self {
        Self {
            points: xs
                .iter()
                .zip(ys)
                .map(|(&x, &y)| Point::new(x, y))
                .collect(),
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Insert a point before `index`, shifting the tail right
    pub fn insert(&mut self, index: usize, point: Point) {
        self.points.insert(index, point);
    }

    /// Remove and return the point at `index`, shifting the tail left
    pub fn remove(&mut self, index: usize) -> Point {
        self.points.remove(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Replace the whole point list
    pub fn replace(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// X column
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Y column
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Points as plain `(x, y)` pairs, the format handed to the physics builder
    pub fn to_tuples(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }

    /// Consecutive point pairs; each one becomes a static collision segment
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_path_has_start_point() {
        let path = Path::new(Point::new(0.0, 360.0));
        assert_eq!(path.len(), 1);
        assert_eq!(path.first(), Some(Point::new(0.0, 360.0)));
        assert_eq!(path.first(), path.last());
    }

    #[test]
    fn test_insert_and_remove_by_index() {
        let mut path = Path::new(Point::new(0.0, 0.0));
        path.push(Point::new(2.0, 0.0));
        path.insert(1, Point::new(1.0, 5.0));
        assert_eq!(path.xs(), vec![0.0, 1.0, 2.0]);

        let removed = path.remove(1);
        assert_eq!(removed, Point::new(1.0, 5.0));
        assert_eq!(path.to_tuples(), vec![(0.0, 0.0), (2.0, 0.0)]);
    }

    #[test]
    fn test_from_xy_pairs_columns() {
        let path = Path::from_xy(&[0.0, 1.0, 2.0], &[10.0, 11.0]);
        assert_eq!(path.len(), 2);
        assert_eq!(path.ys(), vec![10.0, 11.0]);
    }

    #[test]
    fn test_segments_are_consecutive_pairs() {
        let path = Path::from_xy(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]);
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], (Point::new(1.0, 1.0), Point::new(2.0, 0.0)));

        assert_eq!(Path::new(Point::ZERO).segments().count(), 0);
    }

    #[test]
    fn test_serde_round_trip_keeps_order() {
        let path = Path::from_xy(&[0.0, 3.0, 1.5], &[4.0, 5.0, 6.0]);
        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}

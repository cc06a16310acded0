//! Interpolating parametric cubic spline
//!
//! The curve passes through every input point. Points are parameterised by
//! normalised cumulative chord length `u in [0, 1]`, x and y share the same
//! parameterisation, and both ends use not-a-knot conditions (third
//! derivative continuous across the second and second-to-last knots).
//!
//! Resampling is uniform in `u`, not in x.

use super::path::{Path, Point};
use crate::consts::MIN_SPLINE_POINTS;
use crate::error::MapError;

/// Fitted curve: knot parameters, data points and second derivatives
#[derive(Debug, Clone)]
pub struct CubicCurve {
    knots: Vec<f64>,
    points: Vec<Point>,
    moments: Vec<Point>,
}

impl CubicCurve {
    /// Fit a curve through `points`
    ///
    /// Consecutive coincident points are collapsed first, since they would
    /// give two knots the same parameter.
    pub fn fit(points: &[Point]) -> Result<Self, MapError> {
        let (points, cumulative) = chord_parameterise(points);
        let n = points.len();
        if n < MIN_SPLINE_POINTS {
            return Err(MapError::DegenerateInput { points: n });
        }

        let total = cumulative[n - 1];
        let mut knots: Vec<f64> = cumulative.iter().map(|d| d / total).collect();
        knots[n - 1] = 1.0;

        let h: Vec<f64> = knots.windows(2).map(|w| w[1] - w[0]).collect();
        let slopes: Vec<Point> = points
            .windows(2)
            .zip(&h)
            .map(|(w, &hk)| (w[1] - w[0]) / hk)
            .collect();

        // Unknowns are the interior moments M[1..n-1]; the two end moments
        // are eliminated with the not-a-knot conditions.
        let m = n - 2;
        let mut sub = vec![0.0; m];
        let mut diag = vec![0.0; m];
        let mut sup = vec![0.0; m];
        let mut rhs = vec![Point::ZERO; m];
        for r in 0..m {
            let k = r + 1;
            sub[r] = h[k - 1];
            diag[r] = 2.0 * (h[k - 1] + h[k]);
            sup[r] = h[k];
            rhs[r] = 6.0 * (slopes[k] - slopes[k - 1]);
        }

        let (h0, h1) = (h[0], h[1]);
        diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
        sup[0] = (h1 * h1 - h0 * h0) / h1;

        let (a, b) = (h[n - 3], h[n - 2]);
        sub[m - 1] = (a * a - b * b) / a;
        diag[m - 1] = (a + b) * (2.0 * a + b) / a;

        let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs);

        let mut moments = Vec::with_capacity(n);
        moments.push(((h0 + h1) * interior[0] - h0 * interior[1]) / h1);
        moments.extend_from_slice(&interior);
        moments.push(((a + b) * interior[m - 1] - b * interior[m - 2]) / a);

        Ok(Self {
            knots,
            points,
            moments,
        })
    }

    /// Curve parameter of every data point
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Points the curve interpolates (after collapsing duplicates)
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Evaluate the curve at `u`, clamped to `[0, 1]`
    pub fn eval(&self, u: f64) -> Point {
        let u = u.clamp(0.0, 1.0);
        let last = self.knots.len() - 2;
        let k = self
            .knots
            .partition_point(|&t| t <= u)
            .saturating_sub(1)
            .min(last);

        let h = self.knots[k + 1] - self.knots[k];
        let a = self.knots[k + 1] - u;
        let b = u - self.knots[k];
        let (m0, m1) = (self.moments[k], self.moments[k + 1]);
        let (p0, p1) = (self.points[k], self.points[k + 1]);

        m0 * (a * a * a / (6.0 * h))
            + m1 * (b * b * b / (6.0 * h))
            + (p0 / h - m0 * (h / 6.0)) * a
            + (p1 / h - m1 * (h / 6.0)) * b
    }

    /// `count` points at equally spaced parameters from 0 to 1 inclusive
    pub fn sample(&self, count: usize) -> Vec<Point> {
        match count {
            0 => Vec::new(),
            1 => vec![self.eval(0.0)],
            _ => {
                let denom = (count - 1) as f64;
                (0..count).map(|i| self.eval(i as f64 / denom)).collect()
            }
        }
    }
}

/// Drop points that would not advance the chord parameter and return the
/// survivors with their cumulative chord length
fn chord_parameterise(points: &[Point]) -> (Vec<Point>, Vec<f64>) {
    let mut kept: Vec<Point> = Vec::with_capacity(points.len());
    let mut cumulative: Vec<f64> = Vec::with_capacity(points.len());
    for &p in points {
        match (kept.last(), cumulative.last()) {
            (Some(&prev), Some(&dist)) => {
                let next = dist + prev.distance(p);
                if next > dist {
                    kept.push(p);
                    cumulative.push(next);
                }
            }
            _ => {
                kept.push(p);
                cumulative.push(0.0);
            }
        }
    }
    (kept, cumulative)
}

/// Thomas algorithm; the not-a-knot rows stay diagonally dominant for
/// positive knot spacings, so no pivoting is needed
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[Point]) -> Vec<Point> {
    let m = diag.len();
    let mut c = vec![0.0; m];
    let mut d = vec![Point::ZERO; m];

    c[0] = sup[0] / diag[0];
    d[0] = rhs[0] / diag[0];
    for i in 1..m {
        let denom = diag[i] - sub[i] * c[i - 1];
        c[i] = sup[i] / denom;
        d[i] = (rhs[i] - d[i - 1] * sub[i]) / denom;
    }

    let mut x = vec![Point::ZERO; m];
    x[m - 1] = d[m - 1];
    for i in (0..m - 1).rev() {
        x[i] = d[i] - x[i + 1] * c[i];
    }
    x
}

/// Fit a curve through `path` and return `count` points spaced uniformly in
/// curve parameter
pub fn resample(path: &Path, count: usize) -> Result<Path, MapError> {
    let curve = CubicCurve::fit(path.points())?;
    Ok(Path::from_points(curve.sample(count)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn close(a: Point, b: Point) -> bool {
        (a - b).length() < 1e-7
    }

    #[test]
    fn test_curve_passes_through_data() {
        let data = pts(&[
            (0.0, 300.0),
            (40.0, 280.0),
            (20.0, 350.0),
            (60.0, 310.0),
            (100.0, 260.0),
            (140.0, 330.0),
        ]);
        let curve = CubicCurve::fit(&data).unwrap();
        assert_eq!(curve.knots()[0], 0.0);
        assert_eq!(*curve.knots().last().unwrap(), 1.0);
        for (&u, &p) in curve.knots().iter().zip(&data) {
            assert!(close(curve.eval(u), p), "{:?} vs {:?}", curve.eval(u), p);
        }
    }

    #[test]
    fn test_evenly_spaced_line_stays_linear() {
        let data = pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, 10.0), (30.0, 15.0), (40.0, 20.0)]);
        let curve = CubicCurve::fit(&data).unwrap();
        assert!(close(curve.eval(0.5), Point::new(20.0, 10.0)));
        assert!(close(curve.eval(0.125), Point::new(5.0, 2.5)));

        let samples = curve.sample(9);
        for (i, p) in samples.iter().enumerate() {
            assert!(close(*p, Point::new(5.0 * i as f64, 2.5 * i as f64)));
        }
    }

    #[test]
    fn test_four_points_is_enough() {
        let data = pts(&[(0.0, 0.0), (1.0, 2.0), (3.0, 1.0), (4.0, 3.0)]);
        let curve = CubicCurve::fit(&data).unwrap();
        assert!(close(curve.eval(0.0), data[0]));
        assert!(close(curve.eval(1.0), data[3]));
    }

    #[test]
    fn test_too_few_points_is_degenerate() {
        let data = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        assert!(matches!(
            CubicCurve::fit(&data),
            Err(MapError::DegenerateInput { points: 3 })
        ));
    }

    #[test]
    fn test_duplicates_are_collapsed() {
        let data = pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (2.0, 0.0)]);
        assert!(matches!(
            CubicCurve::fit(&data),
            Err(MapError::DegenerateInput { points: 3 })
        ));

        let data = pts(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (2.0, 0.0), (3.0, 2.0)]);
        let curve = CubicCurve::fit(&data).unwrap();
        assert_eq!(curve.points().len(), 4);
    }

    #[test]
    fn test_revisited_points_are_kept() {
        // Same point again later in the sequence is not a consecutive duplicate
        let data = pts(&[(0.0, 5.0), (2.0, 5.0), (4.0, 5.0), (2.0, 5.0), (4.0, 5.0), (6.0, 5.0)]);
        let curve = CubicCurve::fit(&data).unwrap();
        assert_eq!(curve.points().len(), 6);
        assert!(curve.sample(50).iter().all(|p| (p.y - 5.0).abs() < 1e-9));
    }

    #[test]
    fn test_resample_count_and_endpoints() {
        let path = Path::from_xy(
            &[0.0, 30.0, 60.0, 45.0, 90.0, 120.0],
            &[200.0, 240.0, 180.0, 220.0, 260.0, 210.0],
        );
        for count in [1, 2, 7, 640] {
            let out = resample(&path, count).unwrap();
            assert_eq!(out.len(), count);
            assert!(close(out.first().unwrap(), path.first().unwrap()));
        }
        let out = resample(&path, 100).unwrap();
        assert!(close(out.last().unwrap(), path.last().unwrap()));
        assert!(resample(&path, 0).unwrap().is_empty());
    }

    #[test]
    fn test_eval_clamps_parameter() {
        let data = pts(&[(0.0, 0.0), (1.0, 2.0), (3.0, 1.0), (4.0, 3.0)]);
        let curve = CubicCurve::fit(&data).unwrap();
        assert_eq!(curve.eval(-1.0), curve.eval(0.0));
        assert_eq!(curve.eval(2.0), curve.eval(1.0));
    }
}

use log::{debug, warn};

use crate::error::{InterpolationError, Result};
use crate::point::{Point, PointSet};

/// Cubic piece `S(x) = y + b·dx + c·dx² + d·dx³`, `dx = x - x_i`, valid on `[x_i, x_{i+1}]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSegment {
    pub x: f64,
    pub y: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl SplineSegment {
    pub fn evaluate(&self, x: f64) -> f64 {
        let dx = x - self.x;
        self.y + dx * (self.b + dx * (self.c + dx * self.d))
    }

    pub fn first_derivative(&self, x: f64) -> f64 {
        let dx = x - self.x;
        self.b + dx * (2.0 * self.c + dx * 3.0 * self.d)
    }

    pub fn second_derivative(&self, x: f64) -> f64 {
        let dx = x - self.x;
        2.0 * self.c + 6.0 * self.d * dx
    }
}

/// Natural cubic spline through a sorted sequence of knots, one [SplineSegment] per interval.
///
/// `interpolate` methods refuse x outside of the knot range, `extrapolate`
/// continues the first and last segment beyond it.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineFit {
    knots: Vec<Point>,
    segments: Vec<SplineSegment>,
    min_x: f64,
    max_x: f64,
    is_knot_spacing_uniform: bool,
}

impl SplineFit {
    fn new(knots: Vec<Point>, segments: Vec<SplineSegment>) -> Self {
        let min_x = knots[0].get_x();
        let max_x = knots[knots.len() - 1].get_x();

        let spacing: Vec<f64> = knots.windows(2).map(|w| w[1].get_x() - w[0].get_x()).collect();
        let is_knot_spacing_uniform = spacing
            .windows(2)
            .map(|s| (s[1] - s[0]).abs())
            .all(|difference| difference <= 1e-12 * (max_x - min_x));

        SplineFit { knots, segments, min_x, max_x, is_knot_spacing_uniform }
    }

    pub fn segments(&self) -> &[SplineSegment] {
        &self.segments
    }

    pub fn knots(&self) -> &[Point] {
        &self.knots
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }

    pub fn interpolate(&self, x: f64) -> Result<f64> {
        self.check_range(x)?;
        let index = self.find_interval_index(x);
        Ok(self.segments[index].evaluate(x))
    }

    /// Interpolates every x of `x_vector`. Best performance for ascending input,
    /// the previous segment is used as a starting hint for the next lookup.
    pub fn batch_interpolate(&self, x_vector: &[f64]) -> Result<Vec<f64>> {
        for x in x_vector {
            self.check_range(*x)?;
        }

        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;
        for x in x_vector {
            index = self.find_interval_index_with_hint(index, *x);
            results.push(self.segments[index].evaluate(*x));
        }
        Ok(results)
    }

    pub fn extrapolate(&self, x: f64) -> f64 {
        self.segment_for(x).evaluate(x)
    }

    pub fn first_derivative(&self, x: f64) -> f64 {
        self.segment_for(x).first_derivative(x)
    }

    pub fn second_derivative(&self, x: f64) -> f64 {
        self.segment_for(x).second_derivative(x)
    }

    fn segment_for(&self, x: f64) -> &SplineSegment {
        if x <= self.min_x {
            &self.segments[0]
        } else if x >= self.max_x {
            &self.segments[self.segments.len() - 1]
        } else {
            &self.segments[self.find_interval_index(x)]
        }
    }

    fn check_range(&self, x: f64) -> Result<()> {
        if self.min_x <= x && x <= self.max_x {
            Ok(())
        } else {
            Err(InterpolationError::OutOfRange { x, min: self.min_x, max: self.max_x })
        }
    }

    fn find_interval_index(&self, x: f64) -> usize {
        if self.is_knot_spacing_uniform {
            self.find_interval_index_uniform(x)
        } else {
            self.find_interval_index_bisect(x)
        }
    }

    fn find_interval_index_bisect(&self, x: f64) -> usize {
        let mut min = 0;
        let mut max = self.knots.len() - 1;

        while max - min > 1 {
            let mid = (min + max) / 2;
            if x < self.knots[mid].get_x() {
                max = mid;
            } else {
                min = mid;
            }
        }
        min
    }

    fn find_interval_index_uniform(&self, x: f64) -> usize {
        let relative_x = ((x - self.min_x) / (self.max_x - self.min_x)).clamp(0.0, 1.0);
        let index = (relative_x * self.segments.len() as f64).floor() as usize;
        index.min(self.segments.len() - 1)
    }

    fn find_interval_index_with_hint(&self, index_hint: usize, x: f64) -> usize {
        if self.is_in_interval_range(index_hint, x) {
            return index_hint;
        }
        if index_hint + 1 < self.segments.len() && self.is_in_interval_range(index_hint + 1, x) {
            return index_hint + 1;
        }
        self.find_interval_index(x)
    }

    fn is_in_interval_range(&self, interval_index: usize, x: f64) -> bool {
        self.knots[interval_index].get_x() <= x && x <= self.knots[interval_index + 1].get_x()
    }
}

/// Builds natural cubic splines (zero second derivative at both end knots).
///
/// Two points give a single straight segment. For more points the tridiagonal
/// system for the interior second derivatives is solved by forward elimination
/// and back substitution in O(n). The system is strictly diagonally dominant,
/// so once the knots are strictly increasing the solve cannot fail.
/// # Example
/// ```
/// use point_interpolation::{NaturalSplineFitter, PointSet};
/// use assert_approx_eq::assert_approx_eq;
///
/// let points = PointSet::from_points([(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
/// let spline = NaturalSplineFitter::fit(&points).unwrap();
///
/// assert_eq!(2, spline.segments().len());
/// assert_approx_eq!(1.0, spline.interpolate(1.0).unwrap(), 1e-12);
/// assert_approx_eq!(0.0, spline.second_derivative(2.0), 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalSplineFitter;

impl NaturalSplineFitter {
    pub fn fit(points: &PointSet) -> Result<SplineFit> {
        let n = points.len();
        if n < 2 {
            return Err(InterpolationError::InsufficientPoints { required: 2, actual: n });
        }

        let x = points.xs();
        let y = points.ys();

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        if let Some((index, spacing)) = h.iter().enumerate().find(|(_, s)| !(**s > 0.0)) {
            warn!("spline fit rejected: knots {index} and {} have spacing {spacing}", index + 1);
            return Err(InterpolationError::DegenerateGeometry { index, spacing: *spacing });
        }

        let segments = if n == 2 {
            vec![SplineSegment { x: x[0], y: y[0], b: (y[1] - y[0]) / h[0], c: 0.0, d: 0.0 }]
        } else {
            Self::solve_segments(&x, &y, &h)
        };

        debug!("natural spline fit with {} segments", segments.len());
        Ok(SplineFit::new(points.points().to_vec(), segments))
    }

    fn solve_segments(x: &[f64], y: &[f64], h: &[f64]) -> Vec<SplineSegment> {
        let n = x.len();

        let mut alpha = vec![0.0; n];
        for i in 1..n - 1 {
            alpha[i] = 3.0 / h[i] * (y[i + 1] - y[i]) - 3.0 / h[i - 1] * (y[i] - y[i - 1]);
        }

        // forward elimination, l[0] = 1, mu[0] = z[0] = 0
        let mut l = vec![1.0; n];
        let mut mu = vec![0.0; n];
        let mut z = vec![0.0; n];
        for i in 1..n - 1 {
            l[i] = 2.0 * (x[i + 1] - x[i - 1]) - h[i - 1] * mu[i - 1];
            mu[i] = h[i] / l[i];
            z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
        }

        // natural boundary: c[n-1] = 0
        let mut c = vec![0.0; n];
        let mut b = vec![0.0; n - 1];
        let mut d = vec![0.0; n - 1];
        for j in (0..n - 1).rev() {
            c[j] = z[j] - mu[j] * c[j + 1];
            b[j] = (y[j + 1] - y[j]) / h[j] - h[j] * (c[j + 1] + 2.0 * c[j]) / 3.0;
            d[j] = (c[j + 1] - c[j]) / (3.0 * h[j]);
        }

        (0..n - 1)
            .map(|i| SplineSegment { x: x[i], y: y[i], b: b[i], c: c[i], d: d[i] })
            .collect()
    }
}

use std::fmt::Display;

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

use crate::config::FitConfig;
use crate::error::{InterpolationError, Result};
use crate::point::PointSet;

/// Interpolating polynomial `P(x) = Σ a_i x^i` through every point of a [PointSet].
/// Coefficients are ordered by increasing power, so `degree() == coefficients().len() - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    coefficients: Vec<f64>,
    min_x: f64,
    max_x: f64,
}

impl PolynomialFit {
    pub fn new(coefficients: Vec<f64>, min_x: f64, max_x: f64) -> Self {
        PolynomialFit { coefficients, min_x, max_x }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Range `(x_0, x_{n-1})` of the points the polynomial was fitted to.
    pub fn domain(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }

    /// Evaluates polynomial with Horner's scheme. Valid for any x, not only inside [PolynomialFit::domain].
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, a| acc * x + a)
    }

    pub fn derivative(&self, x: f64) -> f64 {
        let mut result = 0.0;
        for (i, a) in self.coefficients.iter().enumerate().skip(1).rev() {
            result = result * x + i as f64 * a;
        }
        result
    }
}

impl Display for PolynomialFit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P(x) =")?;
        for (i, a) in self.coefficients.iter().enumerate() {
            let sign = if i == 0 { "" } else if *a < 0.0 { " -" } else { " +" };
            let value = if i == 0 { *a } else { a.abs() };
            match i {
                0 => write!(f, " {value}")?,
                1 => write!(f, "{sign} {value}·x")?,
                _ => write!(f, "{sign} {value}·x^{i}")?,
            }
        }
        Ok(())
    }
}

/// Solves the Vandermonde system `A·a = y`, `A[i][j] = x_i^j`, with LU decomposition.
///
/// The Vandermonde matrix becomes severely ill-conditioned beyond roughly 10-12
/// points regardless of the solver. Partial pivoting and column scaling keep
/// small systems accurate, they do not change that property of the monomial basis.
/// Systems that end up numerically singular are reported as
/// [InterpolationError::SingularSystem] instead of returning meaningless coefficients.
/// # Example
/// ```
/// use point_interpolation::{PointSet, PolynomialFitter};
/// use assert_approx_eq::assert_approx_eq;
///
/// let points = PointSet::from_points([(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
/// let fit = PolynomialFitter::default().fit(&points).unwrap();
///
/// assert_approx_eq!(0.0, fit.coefficients()[0], 1e-9);
/// assert_approx_eq!(0.0, fit.coefficients()[1], 1e-9);
/// assert_approx_eq!(1.0, fit.coefficients()[2], 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolynomialFitter {
    config: FitConfig,
}

impl PolynomialFitter {
    pub fn new(config: FitConfig) -> Self {
        PolynomialFitter { config }
    }

    pub fn fit(&self, points: &PointSet) -> Result<PolynomialFit> {
        self.config.validate()?;
        let n = points.len();
        if n < 2 {
            return Err(InterpolationError::InsufficientPoints { required: 2, actual: n });
        }

        let xs = points.xs();
        let ys = points.ys();

        let mut matrix = DMatrix::<f64>::from_fn(n, n, |i, j| xs[i].powi(j as i32));
        let rhs = DVector::<f64>::from_vec(ys);

        // scale columns to unit max norm so pivots of different powers are comparable
        let column_scales: Vec<f64> = (0..n)
            .map(|j| {
                let max = matrix.column(j).amax();
                if max > 0.0 { max } else { 1.0 }
            })
            .collect();
        for (j, scale) in column_scales.iter().enumerate() {
            matrix.column_mut(j).unscale_mut(*scale);
        }

        let lu = matrix.lu();
        let pivot_ratio = Self::pivot_ratio(&lu.u());

        if !(pivot_ratio >= self.config.singular_tolerance) {
            return Err(Self::singular(n, pivot_ratio));
        }

        let solution = match lu.solve(&rhs) {
            Some(solution) => solution,
            None => return Err(Self::singular(n, pivot_ratio)),
        };

        let coefficients: Vec<f64> = solution
            .iter()
            .zip(column_scales.iter())
            .map(|(a, scale)| a / scale)
            .collect();

        if coefficients.iter().any(|a| !a.is_finite()) {
            return Err(Self::singular(n, pivot_ratio));
        }

        debug!("polynomial fit of degree {} through {n} points", n - 1);
        Ok(PolynomialFit::new(coefficients, xs[0], xs[n - 1]))
    }

    fn singular(points: usize, pivot_ratio: f64) -> InterpolationError {
        warn!("polynomial fit rejected: singular Vandermonde system for {points} points (pivot ratio {pivot_ratio:e})");
        InterpolationError::SingularSystem { points, pivot_ratio }
    }

    fn pivot_ratio(u: &DMatrix<f64>) -> f64 {
        let diagonal = u.diagonal();
        let max = diagonal.amax();
        if max == 0.0 {
            return 0.0;
        }
        diagonal.amin() / max
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::point::Point;

    #[test]
    fn evaluate() {
        let eps = 1e-6;
        let polynomial = PolynomialFit::new(vec![1.0, 2.5, -0.25], 0.0, 1.0);

        assert_approx_eq!(polynomial.evaluate(2.1), 5.1475, eps);
        assert_approx_eq!(polynomial.evaluate(-3.14), -9.3149, eps);
        assert_approx_eq!(polynomial.evaluate(0.0), 1.0, eps);
        assert_approx_eq!(polynomial.derivative(2.0), 1.5, eps);
        assert_eq!(2, polynomial.degree());
    }

    #[test]
    fn over_x_squared_function() {
        let eps = 1e-9;
        let points = PointSet::from_points([(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);

        let fit = PolynomialFitter::default().fit(&points).unwrap();

        assert_eq!(3, fit.coefficients().len());
        assert_approx_eq!(fit.coefficients()[0], 0.0, eps);
        assert_approx_eq!(fit.coefficients()[1], 0.0, eps);
        assert_approx_eq!(fit.coefficients()[2], 1.0, eps);
        assert_eq!((0.0, 2.0), fit.domain());
    }

    #[test]
    fn two_points_give_line() {
        let eps = 1e-9;
        let points = PointSet::from_points([(0.0, 0.0), (1.0, 5.0)]);

        let fit = PolynomialFitter::default().fit(&points).unwrap();

        assert_eq!(1, fit.degree());
        assert_approx_eq!(fit.coefficients()[0], 0.0, eps);
        assert_approx_eq!(fit.coefficients()[1], 5.0, eps);
        assert_approx_eq!(fit.evaluate(0.5), 2.5, eps);
    }

    #[test]
    fn passes_through_every_point() {
        let points = PointSet::from_points([
            (-2.0, 3.0),
            (-0.5, -1.0),
            (0.3, 2.2),
            (1.0, 0.0),
            (2.5, 4.0),
            (4.0, -3.5),
        ]);

        let fit = PolynomialFitter::default().fit(&points).unwrap();

        assert_eq!(5, fit.degree());
        for point in points.points() {
            assert_approx_eq!(fit.evaluate(point.get_x()), point.get_y(), 1e-8);
        }
    }

    #[test]
    fn pixel_coordinates() {
        // typical canvas clicks, powers of x span many orders of magnitude
        let points = PointSet::from_points([
            (112.0, 340.0),
            (250.0, 198.0),
            (381.0, 260.0),
            (517.0, 120.0),
            (640.0, 305.0),
        ]);

        let fit = PolynomialFitter::default().fit(&points).unwrap();

        for point in points.points() {
            assert_approx_eq!(fit.evaluate(point.get_x()), point.get_y(), 1e-6);
        }
    }

    #[test]
    fn repeated_x_is_singular() {
        let mut points = PointSet::from_points([(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
        points.insert(Point::new(1.0, 3.0));

        let result = PolynomialFitter::default().fit(&points);

        assert!(matches!(result, Err(InterpolationError::SingularSystem { points: 4, .. })));
    }

    #[test]
    fn nearly_repeated_x_is_singular() {
        let points = PointSet::from_points([(0.0, 0.0), (1.0, 1.0), (1.0 + 1e-15, 2.0), (2.0, 4.0)]);

        let result = PolynomialFitter::default().fit(&points);

        assert!(matches!(result, Err(InterpolationError::SingularSystem { .. })));
    }

    #[test]
    fn too_few_points() {
        let points = PointSet::from_points([(0.0, 1.0)]);

        let result = PolynomialFitter::default().fit(&points);

        assert_eq!(
            Err(InterpolationError::InsufficientPoints { required: 2, actual: 1 }),
            result
        );
    }

    #[test]
    fn display_ascending_powers() {
        let polynomial = PolynomialFit::new(vec![1.0, -2.0, 0.5], 0.0, 1.0);

        assert_eq!("P(x) = 1 - 2·x + 0.5·x^2", polynomial.to_string());
    }

    #[test]
    fn nan_tolerance_is_rejected() {
        let points = PointSet::from_points([(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
        let fitter = PolynomialFitter::new(FitConfig { singular_tolerance: f64::NAN });

        let result = fitter.fit(&points);

        assert!(matches!(result, Err(InterpolationError::InvalidConfig(_))));
    }
}

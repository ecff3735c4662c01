use std::iter::FusedIterator;

use crate::config::{Resolution, SamplingConfig};
use crate::error::{InterpolationError, Result};
use crate::point::Point;
use crate::polynomial::PolynomialFit;
use crate::spline::SplineFit;

/// Turns fits into finite, x-ordered sequences of [Point]s for drawing a polyline
/// or writing rows. Both sequences start at the first knot and end at the last one.
/// # Example
/// ```
/// use point_interpolation::{CurveSampler, NaturalSplineFitter, PointSet, Resolution, SamplingConfig};
///
/// let points = PointSet::from_points([(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
/// let spline = NaturalSplineFitter::fit(&points).unwrap();
///
/// let sampler = CurveSampler::new(SamplingConfig {
///     polynomial: Resolution::Subdivisions(10),
///     spline_segment: Resolution::Subdivisions(4),
/// });
/// let samples: Vec<_> = sampler.sample_spline(&spline).unwrap().collect();
///
/// assert_eq!(2 * 4 + 1, samples.len());
/// assert_eq!(points.points()[2], samples[8]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CurveSampler {
    config: SamplingConfig,
}

impl CurveSampler {
    pub fn new(config: SamplingConfig) -> Self {
        CurveSampler { config }
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Upper bound on the number of samples a single curve may produce.
    pub const MAX_SAMPLES: usize = 1 << 24;

    /// Samples `P(x)` across its whole domain `[x_0, x_{n-1}]`. The last sample is at exactly `x_{n-1}`.
    pub fn sample_polynomial<'a>(&self, fit: &'a PolynomialFit) -> Result<PolynomialSamples<'a>> {
        self.config.polynomial.validate()?;
        let (min_x, max_x) = fit.domain();
        let grid = Grid::new(min_x, max_x, self.config.polynomial)?;
        let remaining = Self::checked_total(grid.len, 1)?;

        Ok(PolynomialSamples { fit, end: max_x, remaining, next_index: 0, grid })
    }

    /// Samples every segment on its own half-open interval `[x_i, x_{i+1})`,
    /// then appends the final knot once.
    pub fn sample_spline<'a>(&self, fit: &'a SplineFit) -> Result<SplineSamples<'a>> {
        let resolution = self.config.spline_segment;
        resolution.validate()?;

        let grids = fit
            .knots()
            .windows(2)
            .map(|w| Grid::new(w[0].get_x(), w[1].get_x(), resolution))
            .collect::<Result<Vec<Grid>>>()?;

        let mut remaining = 1;
        for grid in &grids {
            remaining = Self::checked_total(remaining, grid.len)?;
        }

        Ok(SplineSamples { fit, grids, segment: 0, next_index: 0, remaining })
    }

    fn checked_total(count: usize, extra: usize) -> Result<usize> {
        match count.checked_add(extra) {
            Some(total) if total <= Self::MAX_SAMPLES => Ok(total),
            _ => Err(too_many_samples()),
        }
    }
}

fn too_many_samples() -> InterpolationError {
    InterpolationError::InvalidResolution(format!(
        "resolution produces more than {} samples",
        CurveSampler::MAX_SAMPLES
    ))
}

/// Sample positions inside `[start, end)`.
#[derive(Debug, Clone, Copy)]
struct Grid {
    start: f64,
    span: f64,
    resolution: Resolution,
    len: usize,
}

impl Grid {
    fn new(start: f64, end: f64, resolution: Resolution) -> Result<Self> {
        let span = end - start;
        let len = if !(span > 0.0) {
            0
        } else {
            match resolution {
                Resolution::Subdivisions(n) => n,
                Resolution::Step(step) => {
                    // tolerance keeps a step that lands on `end` from adding a duplicate sample
                    let count = ((span / step) - 1e-9).ceil().max(1.0);
                    if !(count <= CurveSampler::MAX_SAMPLES as f64) {
                        return Err(too_many_samples());
                    }
                    count as usize
                }
            }
        };
        if len > CurveSampler::MAX_SAMPLES {
            return Err(too_many_samples());
        }
        Ok(Grid { start, span, resolution, len })
    }

    fn x(&self, index: usize) -> f64 {
        match self.resolution {
            Resolution::Subdivisions(n) => self.start + self.span * index as f64 / n as f64,
            Resolution::Step(step) => self.start + step * index as f64,
        }
    }
}

/// Single pass sequence of polynomial samples, see [CurveSampler::sample_polynomial].
#[derive(Debug)]
pub struct PolynomialSamples<'a> {
    fit: &'a PolynomialFit,
    grid: Grid,
    end: f64,
    next_index: usize,
    remaining: usize,
}

impl Iterator for PolynomialSamples<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        let x = if self.next_index < self.grid.len { self.grid.x(self.next_index) } else { self.end };
        self.next_index += 1;
        self.remaining -= 1;
        Some(Point::new(x, self.fit.evaluate(x)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PolynomialSamples<'_> {}

impl FusedIterator for PolynomialSamples<'_> {}

/// Single pass sequence of spline samples, see [CurveSampler::sample_spline].
#[derive(Debug)]
pub struct SplineSamples<'a> {
    fit: &'a SplineFit,
    grids: Vec<Grid>,
    segment: usize,
    next_index: usize,
    remaining: usize,
}

impl Iterator for SplineSamples<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        let segments = self.fit.segments();

        while let Some(grid) = self.grids.get(self.segment) {
            if self.next_index < grid.len {
                let x = grid.x(self.next_index);
                self.next_index += 1;
                self.remaining -= 1;
                return Some(Point::new(x, segments[self.segment].evaluate(x)));
            }
            self.segment += 1;
            self.next_index = 0;
        }

        let knots = self.fit.knots();
        self.remaining -= 1;
        Some(knots[knots.len() - 1])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SplineSamples<'_> {}

impl FusedIterator for SplineSamples<'_> {}

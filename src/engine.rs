use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use log::trace;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::point::{Point, PointSet};
use crate::polynomial::{PolynomialFit, PolynomialFitter};
use crate::sampler::CurveSampler;
use crate::spline::{NaturalSplineFitter, SplineFit};

/// Sampled curves for one snapshot of the points. Each curve fails on its own,
/// a singular polynomial system does not prevent the spline from being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Curves {
    pub polynomial: Result<Vec<Point>>,
    pub spline: Result<Vec<Point>>,
}

#[derive(Debug, Default)]
struct FitCache {
    key: u64,
    points: Vec<Point>,
    polynomial: Option<Result<PolynomialFit>>,
    spline: Option<Result<SplineFit>>,
}

/// Owns the [PointSet] edited by the application and recomputes both fits from it.
///
/// Fits are memoised on a hash of the sorted point coordinates, so asking again
/// without changing the points does not repeat the solve.
/// # Example
/// ```
/// use point_interpolation::{InterpolationEngine, Point};
///
/// let mut engine = InterpolationEngine::default();
/// engine.insert(Point::new(1.0, 5.0));
/// engine.insert(Point::new(0.0, 0.0));
///
/// let curves = engine.curves().unwrap();
/// let spline = curves.spline.unwrap();
///
/// assert_eq!(Point::new(1.0, 5.0), spline[spline.len() - 1]);
/// assert!(curves.polynomial.is_ok());
/// ```
#[derive(Debug, Default)]
pub struct InterpolationEngine {
    points: PointSet,
    polynomial_fitter: PolynomialFitter,
    sampler: CurveSampler,
    cache: FitCache,
}

impl InterpolationEngine {
    pub fn new(config: EngineConfig) -> Self {
        InterpolationEngine {
            points: PointSet::new(),
            polynomial_fitter: PolynomialFitter::new(config.fit),
            sampler: CurveSampler::new(config.sampling),
            cache: FitCache::default(),
        }
    }

    pub fn with_points(config: EngineConfig, points: PointSet) -> Self {
        let mut engine = InterpolationEngine::new(config);
        engine.points = points;
        engine
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn insert(&mut self, point: Point) {
        self.points.insert(point);
    }

    pub fn replace(&mut self, index: usize, point: Point) -> Option<Point> {
        self.points.replace(index, point)
    }

    pub fn remove(&mut self, index: usize) -> Option<Point> {
        self.points.remove(index)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn polynomial(&mut self) -> Result<PolynomialFit> {
        self.refresh_cache();
        if let Some(fit) = &self.cache.polynomial {
            trace!("polynomial fit cache hit");
            return fit.clone();
        }
        trace!("polynomial fit cache miss");
        let fit = self.polynomial_fitter.fit(&self.points);
        self.cache.polynomial = Some(fit.clone());
        fit
    }

    pub fn spline(&mut self) -> Result<SplineFit> {
        self.refresh_cache();
        if let Some(fit) = &self.cache.spline {
            trace!("spline fit cache hit");
            return fit.clone();
        }
        trace!("spline fit cache miss");
        let fit = NaturalSplineFitter::fit(&self.points);
        self.cache.spline = Some(fit.clone());
        fit
    }

    /// Fits and samples both curves. `None` while there are fewer than two points.
    pub fn curves(&mut self) -> Option<Curves> {
        if self.points.len() < 2 {
            return None;
        }

        let polynomial: Result<Vec<Point>> = self
            .polynomial()
            .and_then(|fit| Ok(self.sampler.sample_polynomial(&fit)?.collect()));
        let spline: Result<Vec<Point>> = self
            .spline()
            .and_then(|fit| Ok(self.sampler.sample_spline(&fit)?.collect()));

        Some(Curves { polynomial, spline })
    }

    fn refresh_cache(&mut self) {
        let key = Self::points_key(&self.points);
        // equal hashes are confirmed against the cached points
        if key != self.cache.key || self.cache.points != self.points.points() {
            self.cache = FitCache { key, points: self.points.points().to_vec(), polynomial: None, spline: None };
        }
    }

    fn points_key(points: &PointSet) -> u64 {
        let mut hasher = DefaultHasher::new();
        points.len().hash(&mut hasher);
        for point in points.points() {
            point.get_x().to_bits().hash(&mut hasher);
            point.get_y().to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }
}

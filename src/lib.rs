//! Interpolation engine for points placed on an image: the unique interpolating
//! polynomial through all points and a natural cubic spline through the same points,
//! plus sampling of both into polylines for drawing or export.
//!
//! Fits are pure functions of a [PointSet] snapshot. Both report failures as
//! [InterpolationError] so a caller can drop just the affected curve.
//!
//! # Example
//! ```
//! use point_interpolation::{CurveSampler, NaturalSplineFitter, PointSet, PolynomialFitter};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let points = PointSet::from_points([(2.0, 4.0), (0.0, 0.0), (1.0, 1.0)]);
//!
//! let polynomial = PolynomialFitter::default().fit(&points).unwrap();
//! let spline = NaturalSplineFitter::fit(&points).unwrap();
//!
//! assert_approx_eq!(2.25, polynomial.evaluate(1.5), 1e-9);
//! assert_approx_eq!(1.0, spline.interpolate(1.0).unwrap(), 1e-12);
//!
//! let sampler = CurveSampler::default();
//! let curve: Vec<_> = sampler.sample_spline(&spline).unwrap().collect();
//! assert_eq!(points.points()[2], curve[curve.len() - 1]);
//! ```

mod config;
mod engine;
mod error;
mod export;
mod point;
mod polynomial;
mod sampler;
mod spline;

pub use config::{EngineConfig, FitConfig, Resolution, SamplingConfig};
pub use engine::{Curves, InterpolationEngine};
pub use error::{InterpolationError, Result};
pub use export::SampleTable;
pub use point::{Point, PointSet};
pub use polynomial::{PolynomialFit, PolynomialFitter};
pub use sampler::{CurveSampler, PolynomialSamples, SplineSamples};
pub use spline::{NaturalSplineFitter, SplineFit, SplineSegment};

use serde::{Deserialize, Serialize};

use crate::error::{InterpolationError, Result};

/// How densely a fit is sampled.
/// - `Subdivisions(n)` - `n` equal subdivisions of the sampled interval,
/// - `Step(s)` - fixed step of `s` domain units (`Step(1.0)` is one sample per pixel).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Subdivisions(usize),
    Step(f64),
}

impl Resolution {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Resolution::Subdivisions(0) => Err(InterpolationError::InvalidResolution(
                "number of subdivisions must be positive".to_string(),
            )),
            Resolution::Step(step) if !(step.is_finite() && step > 0.0) => Err(
                InterpolationError::InvalidResolution(format!("step must be positive and finite, got {step}")),
            ),
            _ => Ok(()),
        }
    }
}

/// Settings of the polynomial solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Smallest accepted ratio `min |U_ii| / max |U_ii|` of the LU factors of the
    /// column-scaled Vandermonde matrix. Below it the system counts as singular.
    pub singular_tolerance: f64,
}

impl FitConfig {
    /// Requires `0 <= singular_tolerance <= 1`, the range of a pivot ratio.
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.singular_tolerance;
        if (0.0..=1.0).contains(&tolerance) {
            Ok(())
        } else {
            Err(InterpolationError::InvalidConfig(format!(
                "singular_tolerance must be within [0, 1], got {tolerance}"
            )))
        }
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        FitConfig { singular_tolerance: 1e-12 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Resolution across the whole polynomial domain `[x_0, x_{n-1}]`.
    pub polynomial: Resolution,
    /// Resolution inside every spline segment `[x_i, x_{i+1}]`.
    pub spline_segment: Resolution,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            polynomial: Resolution::Subdivisions(200),
            spline_segment: Resolution::Subdivisions(100),
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<()> {
        self.polynomial.validate()?;
        self.spline_segment.validate()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fit: FitConfig,
    pub sampling: SamplingConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        self.fit.validate()?;
        self.sampling.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();

        assert_eq!(1e-12, config.fit.singular_tolerance);
        assert_eq!(Resolution::Subdivisions(200), config.sampling.polynomial);
        assert_eq!(Resolution::Subdivisions(100), config.sampling.spline_segment);
        assert!(config.sampling.validate().is_ok());
    }

    #[test]
    fn test_invalid_resolutions() {
        assert!(Resolution::Subdivisions(0).validate().is_err());
        assert!(Resolution::Step(0.0).validate().is_err());
        assert!(Resolution::Step(-1.0).validate().is_err());
        assert!(Resolution::Step(f64::NAN).validate().is_err());
        assert!(Resolution::Step(f64::INFINITY).validate().is_err());
        assert!(Resolution::Step(0.5).validate().is_ok());

        let sampling = SamplingConfig {
            polynomial: Resolution::Step(1.0),
            spline_segment: Resolution::Subdivisions(0),
        };
        assert!(matches!(sampling.validate(), Err(InterpolationError::InvalidResolution(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "sampling": { "polynomial": { "step": 1.0 } } }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(Resolution::Step(1.0), config.sampling.polynomial);
        assert_eq!(Resolution::Subdivisions(100), config.sampling.spline_segment);
        assert_eq!(FitConfig::default(), config.fit);
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig {
            fit: FitConfig { singular_tolerance: 1e-10 },
            sampling: SamplingConfig {
                polynomial: Resolution::Subdivisions(50),
                spline_segment: Resolution::Step(2.0),
            },
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_invalid_singular_tolerance() {
        for tolerance in [f64::NAN, -1e-12, 1.5, f64::INFINITY] {
            let fit = FitConfig { singular_tolerance: tolerance };
            assert!(matches!(fit.validate(), Err(InterpolationError::InvalidConfig(_))));

            let config = EngineConfig { fit, ..EngineConfig::default() };
            assert!(config.validate().is_err());
        }
        assert!(FitConfig { singular_tolerance: 0.0 }.validate().is_ok());
        assert!(EngineConfig::default().validate().is_ok());
    }
}

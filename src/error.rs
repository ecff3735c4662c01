/// Errors returned by the fitters, the sampler and strict fit evaluation.
///
/// Every variant is recoverable: a caller that receives one for a given
/// [PointSet](crate::PointSet) simply omits that curve. The same input always
/// produces the same error, so retrying without changing the points is pointless.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InterpolationError {
    /// The Vandermonde system has no unique solution (repeated x, or the
    /// system is too ill-conditioned to be told apart from a singular one).
    #[error("Vandermonde system for {points} points is singular (pivot ratio {pivot_ratio:e})")]
    SingularSystem {
        points: usize,
        pivot_ratio: f64,
    },

    /// Knot spacing `h_index = x_{index+1} - x_index` is not strictly positive.
    #[error("knots {index} and {} are not strictly increasing in x (spacing {spacing})", .index + 1)]
    DegenerateGeometry {
        index: usize,
        spacing: f64,
    },

    /// A fit was requested with too few points.
    #[error("fit requires at least {required} points, got {actual}")]
    InsufficientPoints {
        required: usize,
        actual: usize,
    },

    /// Strict evaluation outside of the knot domain.
    #[error("x = {x} is out of range [{min}, {max}]")]
    OutOfRange {
        x: f64,
        min: f64,
        max: f64,
    },

    /// Fit setting outside of its accepted range.
    #[error("invalid fit configuration: {0}")]
    InvalidConfig(String),

    /// Sampling resolution that cannot produce a finite, ordered sequence.
    #[error("invalid sampling resolution: {0}")]
    InvalidResolution(String),
}

pub type Result<T> = std::result::Result<T, InterpolationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let singular = InterpolationError::SingularSystem { points: 3, pivot_ratio: 0.0 };
        assert!(singular.to_string().contains("singular"));

        let degenerate = InterpolationError::DegenerateGeometry { index: 1, spacing: 0.0 };
        assert_eq!(
            degenerate.to_string(),
            "knots 1 and 2 are not strictly increasing in x (spacing 0)"
        );

        let insufficient = InterpolationError::InsufficientPoints { required: 2, actual: 1 };
        assert_eq!(insufficient.to_string(), "fit requires at least 2 points, got 1");
    }
}

use thiserror::Error;

/// Errors returned by `CardinalityEstimator`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimatorError {
    /// The estimator cannot be built with the requested shape.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Two estimators with different bucket counts cannot be merged.
    #[error("incompatible shape: expected {expected} buckets, found {found}")]
    IncompatibleShape { expected: usize, found: usize },
}

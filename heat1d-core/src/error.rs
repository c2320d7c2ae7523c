//! Error types for solver construction and execution.

use thiserror::Error;

pub type HeatResult<T> = Result<T, HeatError>;

/// Rejected solver configuration. Detected before any step runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("point count must be >= 3, got {0}")]
    TooFewPoints(usize),

    #[error("step count must be >= 1")]
    NoSteps,

    #[error("diffusion coefficient must be positive and finite, got {0}")]
    InvalidDiffusivity(f64),

    #[error("domain length must be positive and finite, got {0}")]
    InvalidLength(f64),

    #[error("grid spacing L/(N-1) must be representable and positive, got {0}")]
    InvalidSpacing(f64),

    #[error("total simulated time must be positive and finite, got {0}")]
    InvalidDuration(f64),

    #[error("granularity threshold must be >= 1")]
    ZeroThreshold,

    #[error("worker pool size must be >= 1")]
    ZeroThreads,

    #[error("initial field has {actual} samples, expected {expected}")]
    FieldLength { expected: usize, actual: usize },
}

/// Any failure that aborts a run.
#[derive(Error, Debug)]
pub enum HeatError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The dedicated worker pool could not be started.
    #[error("worker pool unavailable: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl HeatError {
    pub fn is_config(&self) -> bool {
        matches!(self, HeatError::Config(_))
    }
}

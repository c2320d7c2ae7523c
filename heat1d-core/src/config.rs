//! Run configuration and the grid quantities derived from it.

use serde::{Deserialize, Serialize};

use crate::boundary::Boundary;
use crate::error::ConfigError;
use crate::scheduler::{Granularity, WorkRange};

/// Largest `alpha * dt / h^2` for which the explicit scheme does not diverge.
pub const STABILITY_LIMIT: f64 = 0.5;

/// Everything needed to construct a solver. Deserializes from partial
/// documents; missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Sample count N, boundaries included.
    pub points: usize,
    /// Domain length L.
    pub length: f64,
    /// Diffusion coefficient.
    pub alpha: f64,
    /// Simulated time T.
    pub total_time: f64,
    /// Number of explicit steps nt.
    pub steps: usize,
    /// Granularity threshold of the range scheduler.
    pub threshold: usize,
    /// Dedicated worker count. `None` shares the global rayon pool.
    pub threads: Option<usize>,
    pub boundary: Boundary,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            points: 100,
            length: 1.0,
            alpha: 0.1,
            total_time: 0.1,
            steps: 1000,
            threshold: Granularity::DEFAULT_THRESHOLD,
            threads: None,
            boundary: Boundary::default(),
        }
    }
}

impl SolverConfig {
    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_total_time(mut self, total_time: f64) -> Self {
        self.total_time = total_time;
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn grid(&self) -> Result<GridParams, ConfigError> {
        GridParams::new(
            self.points,
            self.length,
            self.alpha,
            self.total_time,
            self.steps,
        )
    }

    pub fn granularity(&self) -> Result<Granularity, ConfigError> {
        Granularity::new(self.threshold).ok_or(ConfigError::ZeroThreshold)
    }
}

/// Immutable per-run grid quantities.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GridParams {
    pub points: usize,
    pub length: f64,
    pub alpha: f64,
    pub total_time: f64,
    pub steps: usize,
    /// Spacing `L / (N - 1)`.
    pub h: f64,
    /// Step size `T / nt`.
    pub dt: f64,
    /// `alpha * dt / h^2`.
    pub factor: f64,
}

impl GridParams {
    pub fn new(
        points: usize,
        length: f64,
        alpha: f64,
        total_time: f64,
        steps: usize,
    ) -> Result<Self, ConfigError> {
        if points < 3 {
            return Err(ConfigError::TooFewPoints(points));
        }
        if steps < 1 {
            return Err(ConfigError::NoSteps);
        }
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(ConfigError::InvalidDiffusivity(alpha));
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(ConfigError::InvalidLength(length));
        }
        if !(total_time.is_finite() && total_time > 0.0) {
            return Err(ConfigError::InvalidDuration(total_time));
        }

        let h = length / (points - 1) as f64;
        // h^2 must survive too, or the factor becomes infinite
        if !(h > 0.0 && h * h > 0.0) {
            return Err(ConfigError::InvalidSpacing(h));
        }
        let dt = total_time / steps as f64;
        Ok(Self {
            points,
            length,
            alpha,
            total_time,
            steps,
            h,
            dt,
            factor: alpha * dt / (h * h),
        })
    }

    /// Position of sample `j`.
    pub fn x(&self, j: usize) -> f64 {
        j as f64 * self.h
    }

    /// Indices `[1, N-2]` updated by the stencil each step. Empty for
    /// fewer than three points.
    pub fn interior(&self) -> WorkRange {
        WorkRange::new(1, self.points.saturating_sub(2))
    }

    pub fn is_stable(&self) -> bool {
        self.factor <= STABILITY_LIMIT
    }
}

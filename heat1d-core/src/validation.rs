//! Comparison against the closed-form solution for the sine initial profile.
//!
//! With `u(x, 0) = sin(pi x / L)` and zero ends, the exact solution is
//! `exp(-alpha (pi / L)^2 t) * sin(pi x / L)`. None of this is used by the
//! solver itself.

use std::f64::consts::PI;

use serde::Serialize;

use crate::config::GridParams;
use crate::field::Field;

/// Exact solution at `grid.total_time`, sampled on the grid.
pub fn analytical(grid: &GridParams) -> Field {
    analytical_at(grid, grid.total_time)
}

pub fn analytical_at(grid: &GridParams, t: f64) -> Field {
    let k = PI / grid.length;
    let decay = (-grid.alpha * k * k * t).exp();
    Field::from_fn(grid.points, grid.h, |x| decay * (k * x).sin())
}

/// Discrete L2 norm `sqrt(h * sum (a - b)^2)`.
pub fn l2_error(numerical: &[f64], exact: &[f64], h: f64) -> f64 {
    let sum: f64 = numerical
        .iter()
        .zip(exact)
        .map(|(a, b)| (a - b) * (a - b))
        .sum();
    (h * sum).sqrt()
}

pub fn max_error(numerical: &[f64], exact: &[f64]) -> f64 {
    numerical
        .iter()
        .zip(exact)
        .fold(0.0_f64, |m, (a, b)| m.max((a - b).abs()))
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ErrorReport {
    pub l2: f64,
    pub max: f64,
}

impl ErrorReport {
    pub fn against_analytical(result: &Field, grid: &GridParams) -> Self {
        let exact = analytical(grid);
        Self {
            l2: l2_error(result.values(), exact.values(), grid.h),
            max: max_error(result.values(), exact.values()),
        }
    }
}

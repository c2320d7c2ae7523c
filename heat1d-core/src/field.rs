use std::f64::consts::PI;

use serde::Serialize;

/// Samples of a 1-D field on a uniform grid; sample `j` sits at `j * spacing`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Field {
    spacing: f64,
    values: Vec<f64>,
}

impl Field {
    pub fn new(values: Vec<f64>, spacing: f64) -> Self {
        Self { spacing, values }
    }

    /// Samples `seed(x)` at `x = j * h` for `j` in `0..n`.
    pub fn from_fn<F>(n: usize, h: f64, seed: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        let values = (0..n).map(|j| seed(j as f64 * h)).collect();
        Self::new(values, h)
    }

    /// `sin(pi * x / length)`: a single decaying mode under zero Dirichlet ends.
    pub fn sine(n: usize, h: f64, length: f64) -> Self {
        Self::from_fn(n, h, |x| (PI * x / length).sin())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn x(&self, j: usize) -> f64 {
        j as f64 * self.spacing
    }

    /// `(x, value)` pairs in index order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(j, &v)| (self.x(j), v))
    }

    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
    }
}

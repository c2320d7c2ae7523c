use std::time::Instant;

use log::{debug, info, trace, warn};

use crate::boundary::Boundary;
use crate::config::{GridParams, STABILITY_LIMIT, SolverConfig};
use crate::error::{ConfigError, HeatResult};
use crate::field::Field;
use crate::pool::WorkerPool;
use crate::scheduler::{Granularity, sweep};

/// Time-step driver. Owns both buffers for the whole run: `field` holds the
/// latest completed step and is only read while a step is in flight; `next`
/// is written by the scheduler and then swapped in.
#[derive(Debug)]
pub struct SolverCore {
    grid: GridParams,
    grain: Granularity,
    boundary: Boundary,
    pool: WorkerPool,
    field: Vec<f64>,
    next: Vec<f64>,
    step: usize,
}

impl SolverCore {
    /// Solver seeded with `sin(pi x / L)`.
    pub fn new(config: &SolverConfig) -> HeatResult<SolverCore> {
        let grid = config.grid()?;
        let initial = Field::sine(grid.points, grid.h, grid.length);
        Self::build(config, grid, initial)
    }

    /// Solver seeded with `seed(x)` sampled at every grid point.
    pub fn with_seed<F>(config: &SolverConfig, seed: F) -> HeatResult<SolverCore>
    where
        F: Fn(f64) -> f64,
    {
        let grid = config.grid()?;
        let initial = Field::from_fn(grid.points, grid.h, seed);
        Self::build(config, grid, initial)
    }

    /// Solver starting from a prepared field of exactly `config.points` samples.
    pub fn from_field(config: &SolverConfig, initial: Field) -> HeatResult<SolverCore> {
        let grid = config.grid()?;
        if initial.len() != grid.points {
            return Err(ConfigError::FieldLength {
                expected: grid.points,
                actual: initial.len(),
            }
            .into());
        }
        Self::build(config, grid, initial)
    }

    fn build(config: &SolverConfig, grid: GridParams, initial: Field) -> HeatResult<SolverCore> {
        let grain = config.granularity()?;
        let pool = WorkerPool::new(config.threads)?;

        let mut field = initial.into_values();
        config.boundary.apply(&mut field);
        let next = vec![0.0; grid.points];

        debug!(
            "solver ready: n={} h={:e} dt={:e} factor={:.4} threshold={} threads={}",
            grid.points,
            grid.h,
            grid.dt,
            grid.factor,
            grain.threshold(),
            pool.current_num_threads()
        );
        if !grid.is_stable() {
            warn!(
                "factor {:.4} exceeds the stability limit {STABILITY_LIMIT}; \
                 the solution will diverge",
                grid.factor
            );
        }

        Ok(SolverCore {
            grid,
            grain,
            boundary: config.boundary,
            pool,
            field,
            next,
            step: 0,
        })
    }

    // ---- Accessors ----

    pub fn n(&self) -> usize {
        self.grid.points
    }

    pub fn grid(&self) -> &GridParams {
        &self.grid
    }

    pub fn granularity(&self) -> Granularity {
        self.grain
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn steps_taken(&self) -> usize {
        self.step
    }

    pub fn remaining_steps(&self) -> usize {
        self.grid.steps - self.step
    }

    /// Field after the last completed step.
    pub fn field(&self) -> &[f64] {
        &self.field
    }

    // ---- Stepping ----

    /// Advances one step if any remain. Returns `false` once all `nt` steps
    /// have been taken.
    pub fn step(&mut self) -> bool {
        if self.remaining_steps() == 0 {
            return false;
        }
        self.advance();
        true
    }

    /// Takes every remaining step and hands back the final field.
    pub fn run(mut self) -> Field {
        let started = Instant::now();
        let pending = self.remaining_steps();
        for _ in 0..pending {
            self.advance();
        }
        info!(
            "completed {} steps on {} points in {:.3?}",
            pending,
            self.grid.points,
            started.elapsed()
        );
        Field::new(self.field, self.grid.h)
    }

    fn advance(&mut self) {
        self.boundary.apply(&mut self.next);

        let range = self.grid.interior();
        let factor = self.grid.factor;
        let grain = self.grain;
        let previous = &self.field;
        let next = &mut self.next;
        self.pool
            .install(|| sweep(range, previous, next, factor, grain));

        self.swap_buffers();
        trace!("step {} done", self.step);
    }

    fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.field, &mut self.next);
        self.step += 1;
    }
}

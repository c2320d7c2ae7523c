//! Parallel explicit finite-difference solver for the 1-D heat equation.
//!
//! [`SolverCore`] owns two buffers and advances them `nt` times. Each step
//! pins the Dirichlet ends, then hands the interior to the fork-join
//! [`scheduler`], which halves the index range until pieces fall below the
//! [`Granularity`] threshold and applies the [`kernel`] sequentially there.

pub mod boundary;
pub mod config;
pub mod error;
pub mod field;
pub mod kernel;
pub mod pool;
pub mod scheduler;
pub mod solver;
pub mod validation;

pub use boundary::Boundary;
pub use config::{GridParams, STABILITY_LIMIT, SolverConfig};
pub use error::{ConfigError, HeatError, HeatResult};
pub use field::Field;
pub use kernel::stencil;
pub use pool::WorkerPool;
pub use scheduler::{Granularity, WorkRange, divide_and_conquer, sweep};
pub use solver::SolverCore;
pub use validation::ErrorReport;

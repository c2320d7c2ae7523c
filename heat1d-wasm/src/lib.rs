use heat1d_core::{SolverConfig, SolverCore};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct Solver {
    inner: SolverCore,
}

#[wasm_bindgen]
impl Solver {
    /// Sine-seeded solver with zero ends on the shared pool.
    #[wasm_bindgen(constructor)]
    pub fn new(
        points: usize,
        length: f64,
        alpha: f64,
        total_time: f64,
        steps: usize,
    ) -> Result<Solver, JsValue> {
        let config = SolverConfig::default()
            .with_points(points)
            .with_length(length)
            .with_alpha(alpha)
            .with_total_time(total_time)
            .with_steps(steps);
        let inner = SolverCore::new(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Solver { inner })
    }

    pub fn n(&self) -> usize { self.inner.n() }
    pub fn get_dx(&self) -> f64 { self.inner.grid().h }
    pub fn get_dt(&self) -> f64 { self.inner.grid().dt }
    pub fn get_factor(&self) -> f64 { self.inner.grid().factor }
    pub fn is_stable(&self) -> bool { self.inner.grid().is_stable() }
    pub fn steps_taken(&self) -> usize { self.inner.steps_taken() }
    pub fn remaining_steps(&self) -> usize { self.inner.remaining_steps() }

    // Copy-based JS access (reliable)
    pub fn get_field(&self) -> Vec<f64> {
        self.inner.field().to_vec()
    }

    /// Advances up to `count` steps (WASM-only timing).
    pub fn step(&mut self, count: usize) -> StepInfo {
        let t0 = now_ms();
        let mut k = 0;
        while k < count && self.inner.step() {
            k += 1;
        }
        let t1 = now_ms();
        StepInfo { k, compute_ms: t1 - t0 }
    }
}

#[wasm_bindgen]
pub struct StepInfo {
    k: usize,
    compute_ms: f64,
}

#[wasm_bindgen]
impl StepInfo {
    pub fn k(&self) -> usize { self.k }
    pub fn compute_ms(&self) -> f64 { self.compute_ms }
}


fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

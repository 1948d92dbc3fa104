use potential_core::{PotentialSolver, SolverConfig, StrategyKind};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct Solver {
    inner: PotentialSolver,
}

#[wasm_bindgen]
impl Solver {
    #[wasm_bindgen(constructor)]
    pub fn new(n: usize) -> Result<Solver, JsValue> {
        let inner = PotentialSolver::new(n).map_err(to_js)?;
        Ok(Solver { inner })
    }

    /// Switch update rule. Starts again from a freshly initialised grid.
    pub fn set_strategy(&mut self, name: &str) -> Result<(), JsValue> {
        let strategy: StrategyKind = name.parse().map_err(to_js)?;
        let config = SolverConfig::default()
            .strategy(strategy)
            .regions(self.inner.regions().to_vec());
        self.inner = PotentialSolver::with_config(self.inner.h(), config).map_err(to_js)?;
        Ok(())
    }

    pub fn strategy(&self) -> String {
        self.inner.strategy().to_string()
    }

    pub fn n(&self) -> usize {
        self.inner.h()
    }

    // Copy-based JS access (reliable)
    pub fn get_field(&self) -> Vec<f32> {
        self.inner.result().as_slice().to_vec()
    }

    // Relax + timing (WASM-only)
    pub fn solve(&mut self) -> SolveInfo {
        let t0 = now_ms();
        let c = self.inner.relax();
        let t1 = now_ms();
        SolveInfo {
            iterations: c.iterations,
            compute_ms: t1 - t0,
            max_delta: c.max_delta,
        }
    }
}

#[wasm_bindgen]
pub struct SolveInfo {
    iterations: usize,
    compute_ms: f64,
    max_delta: f32,
}

#[wasm_bindgen]
impl SolveInfo {
    pub fn iterations(&self) -> usize { self.iterations }
    pub fn compute_ms(&self) -> f64 { self.compute_ms }
    pub fn max_delta(&self) -> f32 { self.max_delta }
}

fn to_js(e: potential_core::SolverError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

use std::time::Instant;

use tracing::{debug, info};

use crate::cells::{FreeCells, initialise};
use crate::error::SolverError;
use crate::executor::Executor;
use crate::grid::Grid;
use crate::region::{ClampRegion, reference_regions};
use crate::strategy::{Relaxation, StrategyKind};

/// Reference grid edge length.
pub const DEFAULT_H: usize = 512;

/// How a [`PotentialSolver`] is assembled.
#[derive(Clone, Debug, Default)]
pub struct SolverConfig {
    pub strategy: StrategyKind,
    /// Worker threads for the per-cell updates; `0` runs on the caller.
    pub threads: usize,
    /// Clamp regions in evaluation order. `None` means the reference pair
    /// scaled to the grid.
    pub regions: Option<Vec<ClampRegion>>,
}

impl SolverConfig {
    pub fn strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn regions(mut self, regions: Vec<ClampRegion>) -> Self {
        self.regions = Some(regions);
        self
    }
}

/// Outcome of one call to [`PotentialSolver::relax`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Convergence {
    pub iterations: usize,
    pub max_delta: f32,
}

pub struct PotentialSolver {
    grid: Grid,
    regions: Vec<ClampRegion>,
    free: FreeCells,
    engine: Box<dyn Relaxation>,
    exec: Executor,
    iterations: usize,
    last_delta: Option<f32>,
}

impl PotentialSolver {
    /// Reference configuration: red-black sweeps, two reference discs,
    /// sequential execution.
    pub fn new(h: usize) -> Result<PotentialSolver, SolverError> {
        Self::with_config(h, SolverConfig::default())
    }

    pub fn with_config(h: usize, config: SolverConfig) -> Result<PotentialSolver, SolverError> {
        if h < 3 {
            return Err(SolverError::GridTooSmall { h });
        }
        let regions = config
            .regions
            .unwrap_or_else(|| reference_regions(h).to_vec());
        let exec = Executor::with_threads(config.threads)?;

        let (grid, free) = initialise(h, &regions);
        let engine = config.strategy.build(free.clone());

        info!(
            h,
            strategy = %config.strategy,
            regions = regions.len(),
            free = free.len(),
            even = free.even.len(),
            odd = free.odd.len(),
            threads = exec.threads(),
            "potential solver initialised"
        );

        Ok(PotentialSolver {
            grid,
            regions,
            free,
            engine,
            exec,
            iterations: 0,
            last_delta: None,
        })
    }

    /// Iterate until the largest normalized change is at or below the
    /// strategy's threshold. Always runs at least one iteration and has no
    /// iteration cap.
    pub fn relax(&mut self) -> Convergence {
        let threshold = self.engine.threshold();
        let report_every = self.engine.report_every();
        let mut ctr = 0usize;

        loop {
            let max_delta = self.engine.run_iteration(&mut self.grid, &self.exec);
            if ctr % report_every == 0 {
                info!("loop: {ctr}, delta={max_delta}");
            }
            ctr += 1;
            self.iterations += 1;
            self.last_delta = Some(max_delta);

            if max_delta <= threshold {
                debug!(iterations = ctr, max_delta, "converged");
                return Convergence {
                    iterations: ctr,
                    max_delta,
                };
            }
        }
    }

    /// Relax to convergence and return the wall-clock time in whole seconds.
    pub fn solve(&mut self) -> u64 {
        let start = Instant::now();
        self.relax();
        start.elapsed().as_secs()
    }

    pub fn result(&self) -> &Grid {
        &self.grid
    }

    pub fn h(&self) -> usize {
        self.grid.h()
    }

    pub fn strategy(&self) -> StrategyKind {
        self.engine.kind()
    }

    pub fn regions(&self) -> &[ClampRegion] {
        &self.regions
    }

    pub fn free_cells(&self) -> &FreeCells {
        &self.free
    }

    pub fn threads(&self) -> usize {
        self.exec.threads()
    }

    /// Iterations run across every `relax` call so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn last_delta(&self) -> Option<f32> {
        self.last_delta
    }
}

impl std::fmt::Debug for PotentialSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PotentialSolver")
            .field("h", &self.grid.h())
            .field("strategy", &self.engine.kind())
            .field("free", &self.free.len())
            .field("exec", &self.exec)
            .field("iterations", &self.iterations)
            .finish()
    }
}
